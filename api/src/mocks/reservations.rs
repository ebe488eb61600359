//! Mock reservation provider for testing.

use crate::error::{ApiError, ApiResult};
use crate::providers::ReservationsApi;
use crate::types::{Reservation, ReservationRequest};
use std::future::Future;
use std::sync::{Arc, Mutex};

fn lock_failed() -> ApiError {
    ApiError::RequestFailed("Mutex lock failed".to_string())
}

/// Mock reservation provider.
///
/// Keeps the caller's reservations in memory. Created reservations are
/// assigned sequential ids and show up in subsequent `mine` calls;
/// cancellations remove them.
#[derive(Debug, Clone)]
pub struct MockReservationsApi {
    reservations: Arc<Mutex<Vec<Reservation>>>,
    created: Arc<Mutex<Vec<ReservationRequest>>>,
    cancelled: Arc<Mutex<Vec<u64>>>,
    next_id: Arc<Mutex<u64>>,
    failure: Option<ApiError>,
}

impl MockReservationsApi {
    /// Create a mock with no reservations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reservations(Vec::new())
    }

    /// Create a mock pre-populated with the given reservations.
    #[must_use]
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        let next_id = reservations.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        Self {
            reservations: Arc::new(Mutex::new(reservations)),
            created: Arc::new(Mutex::new(Vec::new())),
            cancelled: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(next_id)),
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

    /// Creation requests received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn created_requests(&self) -> ApiResult<Vec<ReservationRequest>> {
        Ok(self.created.lock().map_err(|_| lock_failed())?.clone())
    }

    /// Reservation ids cancelled so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn cancelled_ids(&self) -> ApiResult<Vec<u64>> {
        Ok(self.cancelled.lock().map_err(|_| lock_failed())?.clone())
    }
}

impl Default for MockReservationsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationsApi for MockReservationsApi {
    fn create(
        &self,
        request: &ReservationRequest,
    ) -> impl Future<Output = ApiResult<Reservation>> + Send {
        let reservations = Arc::clone(&self.reservations);
        let created = Arc::clone(&self.created);
        let next_id = Arc::clone(&self.next_id);
        let failure = self.failure.clone();
        let request = request.clone();

        async move {
            created
                .lock()
                .map_err(|_| lock_failed())?
                .push(request.clone());

            if let Some(error) = failure {
                return Err(error);
            }

            let id = {
                let mut guard = next_id.lock().map_err(|_| lock_failed())?;
                let id = *guard;
                *guard += 1;
                id
            };

            let reservation = Reservation {
                id,
                parking_space_id: request.parking_space_id,
                reservation_date: request.reservation_date.to_string(),
                spot_number: None,
                status: Some("ACTIVE".to_string()),
            };

            reservations
                .lock()
                .map_err(|_| lock_failed())?
                .push(reservation.clone());

            Ok(reservation)
        }
    }

    fn cancel(&self, reservation_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let reservations = Arc::clone(&self.reservations);
        let cancelled = Arc::clone(&self.cancelled);
        let failure = self.failure.clone();

        async move {
            cancelled
                .lock()
                .map_err(|_| lock_failed())?
                .push(reservation_id);

            if let Some(error) = failure {
                return Err(error);
            }

            reservations
                .lock()
                .map_err(|_| lock_failed())?
                .retain(|r| r.id != reservation_id);
            Ok(())
        }
    }

    fn mine(&self) -> impl Future<Output = ApiResult<Vec<Reservation>>> + Send {
        let reservations = Arc::clone(&self.reservations);
        let failure = self.failure.clone();

        async move {
            if let Some(error) = failure {
                return Err(error);
            }

            Ok(reservations.lock().map_err(|_| lock_failed())?.clone())
        }
    }
}
