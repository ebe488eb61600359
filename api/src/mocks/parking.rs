//! Mock parking availability provider for testing.

use crate::error::{ApiError, ApiResult};
use crate::providers::ParkingApi;
use crate::types::ParkingSpace;
use chrono::NaiveDate;
use std::future::Future;
use std::sync::{Arc, Mutex};

fn lock_failed() -> ApiError {
    ApiError::RequestFailed("Mutex lock failed".to_string())
}

/// Mock parking availability provider.
///
/// Serves a fixed set of spaces regardless of date and records which dates
/// were queried.
#[derive(Debug, Clone)]
pub struct MockParkingApi {
    spaces: Arc<Mutex<Vec<ParkingSpace>>>,
    queried_dates: Arc<Mutex<Vec<NaiveDate>>>,
    failure: Option<ApiError>,
}

impl MockParkingApi {
    /// Create a mock with no spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spaces(Vec::new())
    }

    /// Create a mock serving the given spaces.
    #[must_use]
    pub fn with_spaces(spaces: Vec<ParkingSpace>) -> Self {
        Self {
            spaces: Arc::new(Mutex::new(spaces)),
            queried_dates: Arc::new(Mutex::new(Vec::new())),
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

    /// Replace the served spaces, e.g. to simulate a booking landing
    /// between two loads.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn set_spaces(&self, spaces: Vec<ParkingSpace>) -> ApiResult<()> {
        *self.spaces.lock().map_err(|_| lock_failed())? = spaces;
        Ok(())
    }

    /// Dates queried so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn queried_dates(&self) -> ApiResult<Vec<NaiveDate>> {
        Ok(self
            .queried_dates
            .lock()
            .map_err(|_| lock_failed())?
            .clone())
    }
}

impl Default for MockParkingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingApi for MockParkingApi {
    fn spaces(&self, date: NaiveDate) -> impl Future<Output = ApiResult<Vec<ParkingSpace>>> + Send {
        let spaces = Arc::clone(&self.spaces);
        let queried_dates = Arc::clone(&self.queried_dates);
        let failure = self.failure.clone();

        async move {
            queried_dates.lock().map_err(|_| lock_failed())?.push(date);

            if let Some(error) = failure {
                return Err(error);
            }

            Ok(spaces.lock().map_err(|_| lock_failed())?.clone())
        }
    }
}
