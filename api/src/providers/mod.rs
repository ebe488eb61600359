//! Backend API traits.
//!
//! This module defines traits for every backend surface the client talks
//! to. Reducers depend on these traits, never on the HTTP client directly,
//! which keeps feature logic testable with in-memory mocks.
//!
//! [`crate::ApiClient`] implements all of them over HTTP; the mocks in
//! [`crate::mocks`] implement them over in-memory state.

pub mod admin;
pub mod auth;
pub mod owner;
pub mod parking;
pub mod reservations;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use owner::OwnerApi;
pub use parking::ParkingApi;
pub use reservations::ReservationsApi;
