//! Reducers for every screen of the client.
//!
//! One reducer per screen, each owning its state, actions, and
//! environment. All follow the same shape: synchronous state transitions
//! in the match arms, async work pushed out as effects that feed events
//! back in.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod owner;

pub use admin::AdminReducer;
pub use auth::AuthReducer;
pub use booking::BookingReducer;
pub use owner::OwnerReducer;
