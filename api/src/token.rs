//! Authorization header sourcing.
//!
//! The API client attaches an `Authorization` header to every request when
//! one is available. Where the header value comes from is the caller's
//! business: the client app reads it from its session holder, tests pin a
//! static value.

/// Source of the `Authorization` header value.
///
/// Implementations return the full header value, scheme included, e.g.
/// `Bearer eyJhb...`. Returning `None` sends the request unauthenticated.
pub trait TokenProvider: Send + Sync {
    /// Current `Authorization` header value, if a session exists.
    fn authorization(&self) -> Option<String>;
}

/// Token provider with a fixed value.
///
/// Useful for tests and one-off scripts.
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    value: Option<String>,
}

impl StaticToken {
    /// Provider that always sends `Bearer <token>`.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            value: Some(format!("Bearer {}", token.into())),
        }
    }

    /// Provider that sends no `Authorization` header.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { value: None }
    }
}

impl TokenProvider for StaticToken {
    fn authorization(&self) -> Option<String> {
        self.value.clone()
    }
}
