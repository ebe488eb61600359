//! Mock providers for testing.
//!
//! Each mock implements its provider trait over in-memory state and records
//! the calls it receives, so reducer tests can assert both the resulting
//! state and the requests that were issued. Failure injection goes through
//! the `failing` constructors.

pub mod admin;
pub mod auth;
pub mod owner;
pub mod parking;
pub mod reservations;

pub use admin::{AdminMutation, MockAdminApi};
pub use auth::MockAuthApi;
pub use owner::MockOwnerApi;
pub use parking::MockParkingApi;
pub use reservations::MockReservationsApi;
