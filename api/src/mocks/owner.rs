//! Mock owner provider for testing.

use crate::error::{ApiError, ApiResult};
use crate::providers::OwnerApi;
use crate::types::OwnerCancellationRequest;
use chrono::NaiveDate;
use std::future::Future;
use std::sync::{Arc, Mutex};

fn lock_failed() -> ApiError {
    ApiError::RequestFailed("Mutex lock failed".to_string())
}

/// Mock owner provider.
///
/// Records the dates an owner marked as unavailable.
#[derive(Debug, Clone)]
pub struct MockOwnerApi {
    cancelled_dates: Arc<Mutex<Vec<NaiveDate>>>,
    failure: Option<ApiError>,
}

impl MockOwnerApi {
    /// Create a mock that accepts every cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled_dates: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Create a mock where every call fails with `error`.
    #[must_use]
    pub fn failing(error: ApiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Dates cancelled so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn cancelled_dates(&self) -> ApiResult<Vec<NaiveDate>> {
        Ok(self
            .cancelled_dates
            .lock()
            .map_err(|_| lock_failed())?
            .clone())
    }
}

impl Default for MockOwnerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnerApi for MockOwnerApi {
    fn cancel_availability(
        &self,
        request: &OwnerCancellationRequest,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let cancelled_dates = Arc::clone(&self.cancelled_dates);
        let failure = self.failure.clone();
        let date = request.cancellation_date;

        async move {
            cancelled_dates.lock().map_err(|_| lock_failed())?.push(date);

            if let Some(error) = failure {
                return Err(error);
            }

            Ok(())
        }
    }
}
