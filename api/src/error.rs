//! Error types for the Parkdeck API client

use thiserror::Error;

/// Result alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur when talking to the Parkdeck backend
///
/// Failures fall into three families: transport problems before a response
/// arrives, rejections where the backend answered with an error status, and
/// responses the client could not decode. Actions carry these values, so
/// the type is `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - missing or invalid token
    #[error("Unauthorized - missing or invalid token")]
    Unauthorized,

    /// Forbidden - authenticated but not allowed
    #[error("Forbidden - insufficient permissions")]
    Forbidden,

    /// Backend rejected the request
    ///
    /// `message` is extracted from the response body when the backend sends
    /// one, otherwise a generic status description.
    #[error("Rejected (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },
}

impl ApiError {
    /// Whether this error happened before the backend produced a response
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Backend-provided message, when one exists
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message to surface to the user, preferring the backend's own wording
    ///
    /// Transport and decode failures fall back to the caller's generic
    /// message; the raw error text is for logs, not for people.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .map_or_else(|| fallback.to_string(), str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_wording() {
        let error = ApiError::Rejected {
            status: 409,
            message: "Space already reserved".to_string(),
        };
        assert_eq!(
            error.user_message("Failed to book parking space"),
            "Space already reserved"
        );
    }

    #[test]
    fn test_user_message_falls_back_for_transport_errors() {
        let error = ApiError::RequestFailed("connection refused".to_string());
        assert_eq!(
            error.user_message("Failed to load parking spaces"),
            "Failed to load parking spaces"
        );
    }
}
