//! Client configuration.
//!
//! Everything comes from the environment with sensible defaults, so the
//! demo binary runs with no setup at all. Logging is configured separately
//! through `RUST_LOG`.

use std::path::PathBuf;

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Parkdeck backend.
    pub api_url: String,

    /// Substitute canned data when the backend fails or comes back empty.
    pub demo_fallback: bool,

    /// Where the session file lives.
    pub session_file: PathBuf,
}

impl Config {
    /// Configuration with defaults: local backend, no demo fallback,
    /// session file in the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            demo_fallback: false,
            session_file: PathBuf::from("parkdeck-session.json"),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// * `PARKDECK_API_URL` - backend base URL
    /// * `PARKDECK_DEMO_FALLBACK` - `true` to render demo data on failure
    /// * `PARKDECK_SESSION_FILE` - path of the session file
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::new();
        Self {
            api_url: std::env::var("PARKDECK_API_URL").unwrap_or(defaults.api_url),
            demo_fallback: std::env::var("PARKDECK_DEMO_FALLBACK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.demo_fallback),
            session_file: std::env::var("PARKDECK_SESSION_FILE")
                .map_or(defaults.session_file, PathBuf::from),
        }
    }

    /// Override the backend base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Enable or disable demo fallback.
    #[must_use]
    pub fn with_demo_fallback(mut self, enabled: bool) -> Self {
        self.demo_fallback = enabled;
        self
    }

    /// Override the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
