//! Owner endpoints.

use crate::error::ApiResult;
use crate::types::OwnerCancellationRequest;

/// Owner surface of the backend.
pub trait OwnerApi: Send + Sync {
    /// Withdraw all spots for a date.
    ///
    /// Existing reservations for that date flip to owner-cancelled.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Date is inside the lead-time window → `ApiError::Rejected`
    fn cancel_availability(
        &self,
        request: &OwnerCancellationRequest,
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;
}
