//! Mock auth provider for testing.

use crate::error::{ApiError, ApiResult};
use crate::providers::AuthApi;
use crate::types::{LoginRequest, RegisterRequest, Role, Session};
use std::future::Future;
use std::sync::{Arc, Mutex};

fn lock_failed() -> ApiError {
    ApiError::RequestFailed("Mutex lock failed".to_string())
}

/// Mock auth provider.
///
/// Returns a canned session with the caller's email echoed back, and records
/// every login and registration attempt.
#[derive(Debug, Clone)]
pub struct MockAuthApi {
    session: Session,
    failure: Option<ApiError>,
    logins: Arc<Mutex<Vec<LoginRequest>>>,
    registrations: Arc<Mutex<Vec<RegisterRequest>>>,
}

impl MockAuthApi {
    /// Create a mock that authenticates everyone as a plain user.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(Session {
            token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            user_id: 1,
            email: "user@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: Role::User,
        })
    }

    /// Create a mock returning the given session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            failure: None,
            logins: Arc::new(Mutex::new(Vec::new())),
            registrations: Arc::new(Mutex::new(Vec::new())),
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

    /// The canned session this mock hands out.
    #[must_use]
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    /// Login attempts received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn recorded_logins(&self) -> ApiResult<Vec<LoginRequest>> {
        Ok(self.logins.lock().map_err(|_| lock_failed())?.clone())
    }

    /// Registration attempts received so far (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn recorded_registrations(&self) -> ApiResult<Vec<RegisterRequest>> {
        Ok(self
            .registrations
            .lock()
            .map_err(|_| lock_failed())?
            .clone())
    }
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthApi for MockAuthApi {
    fn login(&self, request: &LoginRequest) -> impl Future<Output = ApiResult<Session>> + Send {
        let logins = Arc::clone(&self.logins);
        let failure = self.failure.clone();
        let mut session = self.session.clone();
        let request = request.clone();

        async move {
            logins
                .lock()
                .map_err(|_| lock_failed())?
                .push(request.clone());

            if let Some(error) = failure {
                return Err(error);
            }

            session.email = request.email;
            Ok(session)
        }
    }

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = ApiResult<Session>> + Send {
        let registrations = Arc::clone(&self.registrations);
        let failure = self.failure.clone();
        let mut session = self.session.clone();
        let request = request.clone();

        async move {
            registrations
                .lock()
                .map_err(|_| lock_failed())?
                .push(request.clone());

            if let Some(error) = failure {
                return Err(error);
            }

            session.email = request.email;
            session.first_name = request.first_name;
            session.last_name = request.last_name;
            Ok(session)
        }
    }
}
