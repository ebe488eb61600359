//! Authentication endpoints.

use crate::error::ApiResult;
use crate::types::{LoginRequest, RegisterRequest, Session};

/// Authentication surface of the backend.
pub trait AuthApi: Send + Sync {
    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Credentials are rejected → `ApiError::Rejected`
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = ApiResult<Session>> + Send;

    /// Register a new account.
    ///
    /// The backend logs the new account in; the returned session is live.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network request fails
    /// - Email already registered → `ApiError::Rejected`
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl std::future::Future<Output = ApiResult<Session>> + Send;
}
