//! Mock admin provider for testing.

use crate::error::{ApiError, ApiResult};
use crate::providers::AdminApi;
use crate::types::{AdminReservationRow, AdminUserRow, ListQuery, Page, Role};
use std::future::Future;
use std::sync::{Arc, Mutex};

fn lock_failed() -> ApiError {
    ApiError::RequestFailed("Mutex lock failed".to_string())
}

/// A recorded admin mutation (for testing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminMutation {
    SetAdmin { user_id: u64, is_admin: bool },
    SetOwner { user_id: u64, make_owner: bool },
    UpdateRole { user_id: u64, role: Role },
    DeleteUser { user_id: u64 },
    CancelReservation { reservation_id: u64 },
    RevokeParking { parking_id: u64 },
}

/// Mock admin provider.
///
/// Serves user and reservation lists from memory, applying the query's
/// search filter and paging the way the backend does. Mutations are
/// recorded and applied to the stored rows, so a reload after a toggle
/// reflects the change.
#[derive(Debug, Clone)]
pub struct MockAdminApi {
    users: Arc<Mutex<Vec<AdminUserRow>>>,
    reservations: Arc<Mutex<Vec<AdminReservationRow>>>,
    user_queries: Arc<Mutex<Vec<ListQuery>>>,
    reservation_queries: Arc<Mutex<Vec<ListQuery>>>,
    mutations: Arc<Mutex<Vec<AdminMutation>>>,
    failure: Option<ApiError>,
    mutation_failure: Option<ApiError>,
}

impl MockAdminApi {
    /// Create a mock with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            reservations: Arc::new(Mutex::new(Vec::new())),
            user_queries: Arc::new(Mutex::new(Vec::new())),
            reservation_queries: Arc::new(Mutex::new(Vec::new())),
            mutations: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            mutation_failure: None,
        }
    }

    /// Serve the given user rows.
    #[must_use]
    pub fn with_users(self, users: Vec<AdminUserRow>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            ..self
        }
    }

    /// Serve the given reservation rows.
    #[must_use]
    pub fn with_reservations(self, reservations: Vec<AdminReservationRow>) -> Self {
        Self {
            reservations: Arc::new(Mutex::new(reservations)),
            ..self
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

    /// Fail mutations with `error` while list calls keep working.
    ///
    /// Lets tests drive the optimistic-update-then-revert path.
    #[must_use]
    pub fn failing_mutations(self, error: ApiError) -> Self {
        Self {
            mutation_failure: Some(error),
            ..self
        }
    }

    /// User list queries received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn recorded_user_queries(&self) -> ApiResult<Vec<ListQuery>> {
        Ok(self.user_queries.lock().map_err(|_| lock_failed())?.clone())
    }

    /// Reservation list queries received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn recorded_reservation_queries(&self) -> ApiResult<Vec<ListQuery>> {
        Ok(self
            .reservation_queries
            .lock()
            .map_err(|_| lock_failed())?
            .clone())
    }

    /// Mutations received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn recorded_mutations(&self) -> ApiResult<Vec<AdminMutation>> {
        Ok(self.mutations.lock().map_err(|_| lock_failed())?.clone())
    }

    fn record_mutation(&self, mutation: AdminMutation) -> ApiResult<()> {
        self.mutations
            .lock()
            .map_err(|_| lock_failed())?
            .push(mutation);

        match &self.mutation_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(rows: &[T], query: &ListQuery, matches: impl Fn(&T) -> bool) -> Page<T> {
    let filtered: Vec<T> = rows.iter().filter(|row| matches(row)).cloned().collect();
    let total = filtered.len() as u64;
    let start = (query.page as usize) * (query.size as usize);
    let items = filtered
        .into_iter()
        .skip(start)
        .take(query.size as usize)
        .collect();

    Page { items, total }
}

fn matches_user(row: &AdminUserRow, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let search = search.to_lowercase();
    row.email.to_lowercase().contains(&search)
        || row.first_name.to_lowercase().contains(&search)
        || row.last_name.to_lowercase().contains(&search)
}

fn matches_reservation(row: &AdminReservationRow, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    row.user_email.to_lowercase().contains(&search.to_lowercase())
}

impl AdminApi for MockAdminApi {
    fn users(&self, query: &ListQuery) -> impl Future<Output = ApiResult<Page<AdminUserRow>>> + Send {
        let users = Arc::clone(&self.users);
        let user_queries = Arc::clone(&self.user_queries);
        let failure = self.failure.clone();
        let query = query.clone();

        async move {
            user_queries
                .lock()
                .map_err(|_| lock_failed())?
                .push(query.clone());

            if let Some(error) = failure {
                return Err(error);
            }

            let guard = users.lock().map_err(|_| lock_failed())?;
            Ok(page_of(&guard, &query, |row| {
                matches_user(row, &query.search)
            }))
        }
    }

    fn reservations(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = ApiResult<Page<AdminReservationRow>>> + Send {
        let reservations = Arc::clone(&self.reservations);
        let reservation_queries = Arc::clone(&self.reservation_queries);
        let failure = self.failure.clone();
        let query = query.clone();

        async move {
            reservation_queries
                .lock()
                .map_err(|_| lock_failed())?
                .push(query.clone());

            if let Some(error) = failure {
                return Err(error);
            }

            let guard = reservations.lock().map_err(|_| lock_failed())?;
            Ok(page_of(&guard, &query, |row| {
                matches_reservation(row, &query.search)
            }))
        }
    }

    fn set_admin(&self, user_id: u64, is_admin: bool) -> impl Future<Output = ApiResult<()>> + Send {
        let users = Arc::clone(&self.users);
        let recorded = self.record_mutation(AdminMutation::SetAdmin { user_id, is_admin });

        async move {
            recorded?;

            let mut guard = users.lock().map_err(|_| lock_failed())?;
            if let Some(row) = guard.iter_mut().find(|row| row.id == user_id) {
                row.is_admin = is_admin;
            }
            Ok(())
        }
    }

    fn set_owner(
        &self,
        user_id: u64,
        make_owner: bool,
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let users = Arc::clone(&self.users);
        let recorded = self.record_mutation(AdminMutation::SetOwner { user_id, make_owner });

        async move {
            recorded?;

            let mut guard = users.lock().map_err(|_| lock_failed())?;
            if let Some(row) = guard.iter_mut().find(|row| row.id == user_id) {
                row.parking_type = if make_owner { Role::Owner } else { Role::User };
            }
            Ok(())
        }
    }

    fn update_role(&self, user_id: u64, role: Role) -> impl Future<Output = ApiResult<()>> + Send {
        let users = Arc::clone(&self.users);
        let recorded = self.record_mutation(AdminMutation::UpdateRole { user_id, role });

        async move {
            recorded?;

            let mut guard = users.lock().map_err(|_| lock_failed())?;
            if let Some(row) = guard.iter_mut().find(|row| row.id == user_id) {
                match role {
                    Role::Admin => row.is_admin = true,
                    role => row.parking_type = role,
                }
            }
            Ok(())
        }
    }

    fn delete_user(&self, user_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let users = Arc::clone(&self.users);
        let recorded = self.record_mutation(AdminMutation::DeleteUser { user_id });

        async move {
            recorded?;

            users
                .lock()
                .map_err(|_| lock_failed())?
                .retain(|row| row.id != user_id);
            Ok(())
        }
    }

    fn cancel_reservation(&self, reservation_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let reservations = Arc::clone(&self.reservations);
        let recorded = self.record_mutation(AdminMutation::CancelReservation { reservation_id });

        async move {
            recorded?;

            reservations
                .lock()
                .map_err(|_| lock_failed())?
                .retain(|row| row.id != reservation_id);
            Ok(())
        }
    }

    fn revoke_parking(&self, parking_id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let recorded = self.record_mutation(AdminMutation::RevokeParking { parking_id });
        async move { recorded }
    }
}
