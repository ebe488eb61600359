//! Reservation endpoints.

use crate::error::ApiResult;
use crate::types::{Reservation, ReservationRequest};

/// Reservation surface of the backend.
pub trait ReservationsApi: Send + Sync {
    /// Reserve a space for a date.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Space already taken for that date → `ApiError::Rejected`
    fn create(
        &self,
        request: &ReservationRequest,
    ) -> impl std::future::Future<Output = ApiResult<Reservation>> + Send;

    /// Cancel a reservation by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the reservation does
    /// not belong to the requesting user.
    fn cancel(
        &self,
        reservation_id: u64,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// The requesting user's reservations.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn mine(&self) -> impl std::future::Future<Output = ApiResult<Vec<Reservation>>> + Send;
}
