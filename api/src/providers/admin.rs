//! Admin console endpoints.

use crate::error::ApiResult;
use crate::types::{AdminReservationRow, AdminUserRow, ListQuery, Page, Role};

/// Admin surface of the backend.
///
/// Every method requires an admin session; the backend answers 403
/// otherwise.
pub trait AdminApi: Send + Sync {
    /// One page of users matching the query.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session lacks
    /// admin rights.
    fn users(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = ApiResult<Page<AdminUserRow>>> + Send;

    /// One page of reservations matching the query.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the session lacks
    /// admin rights.
    fn reservations(
        &self,
        query: &ListQuery,
    ) -> impl std::future::Future<Output = ApiResult<Page<AdminReservationRow>>> + Send;

    /// Grant or revoke admin rights.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the backend rejects
    /// the change.
    fn set_admin(
        &self,
        user_id: u64,
        is_admin: bool,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Grant or revoke the owner role.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the backend rejects
    /// the change.
    fn set_owner(
        &self,
        user_id: u64,
        make_owner: bool,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Replace a user's role outright.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the backend rejects
    /// the change.
    fn update_role(
        &self,
        user_id: u64,
        role: Role,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the backend rejects
    /// the deletion.
    fn delete_user(&self, user_id: u64) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Cancel any user's reservation.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the reservation is
    /// unknown.
    fn cancel_reservation(
        &self,
        reservation_id: u64,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Detach a parking lot from its owner.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the lot is unknown.
    fn revoke_parking(
        &self,
        parking_id: u64,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;
}
