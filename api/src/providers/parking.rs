//! Parking availability endpoints.

use crate::error::ApiResult;
use crate::types::ParkingSpace;
use chrono::NaiveDate;

/// Availability surface of the backend.
pub trait ParkingApi: Send + Sync {
    /// All spots with their status for `date`, relative to the requesting
    /// user.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails or the backend rejects
    /// the query.
    fn spaces(
        &self,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = ApiResult<Vec<ParkingSpace>>> + Send;
}
