//! # Parkdeck API
//!
//! REST bindings for the Parkdeck backend.
//!
//! Each backend area is exposed as a provider trait ([`AuthApi`],
//! [`ParkingApi`], [`ReservationsApi`], [`OwnerApi`], [`AdminApi`]) so
//! reducers depend on capabilities rather than on HTTP. [`ApiClient`]
//! implements all of them over `reqwest`; the mocks (behind the
//! `test-utils` feature) implement them in memory.
//!
//! ## Example
//!
//! ```ignore
//! use parkdeck_api::{ApiClient, AuthApi, LoginRequest, StaticToken};
//!
//! let client = ApiClient::new("http://localhost:8080", StaticToken::anonymous());
//! let session = client
//!     .login(&LoginRequest {
//!         email: "user@example.com".to_string(),
//!         password: "hunter2!".to_string(),
//!     })
//!     .await?;
//! ```

pub mod client;
pub mod error;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod providers;
pub mod token;
pub mod types;

// Re-export main types for convenience
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use providers::{AdminApi, AuthApi, OwnerApi, ParkingApi, ReservationsApi};
pub use token::{StaticToken, TokenProvider};
pub use types::{
    AdminReservationRow, AdminUserRow, ListQuery, LoginRequest, OwnerCancellationRequest, Page,
    ParkingSpace, RegisterRequest, Reservation, ReservationRequest, Role, Session, SpotStatus,
    Zone,
};
