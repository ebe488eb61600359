//! # Parkdeck Client
//!
//! State management for the Parkdeck parking reservation client.
//!
//! Every screen is a reducer: the availability grid ([`BookingReducer`]),
//! login and registration ([`AuthReducer`]), the owner cancellation flow
//! ([`OwnerReducer`]), and the admin console ([`AdminReducer`]). Each one
//! pairs a state struct with an action enum and an environment of
//! capability traits, so backend calls, clocks, and storage are all
//! swappable in tests.
//!
//! ## Architecture
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! Reducers are pure: they mutate state synchronously and describe async
//! work as effects. A [`parkdeck_runtime::Store`] executes those effects
//! and feeds the resulting events back in.
//!
//! ## Example: loading the grid
//!
//! ```rust,ignore
//! use parkdeck_client::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
//! use parkdeck_runtime::Store;
//!
//! let env = BookingEnvironment::new(api.clone(), api.clone(), false);
//! let store = Store::new(BookingState::default(), BookingReducer::new(), env);
//!
//! let handle = store
//!     .send(BookingAction::LoadAvailability { date: today })
//!     .await?;
//! handle.wait().await;
//!
//! let spaces = store.state(|s| s.yard_spaces.len()).await;
//! ```

// Public modules
pub mod actions;
pub mod config;
pub mod dates;
pub mod demo;
pub mod environment;
pub mod notify;
pub mod reducers;
pub mod session;
pub mod state;
pub mod storage;
pub mod validate;

// Re-export main types for convenience
pub use actions::{AdminAction, AuthAction, BookingAction, OwnerAction};
pub use config::Config;
pub use environment::{AdminEnvironment, AuthEnvironment, BookingEnvironment, OwnerEnvironment};
pub use notify::{Toast, ToastKind, Toasts};
pub use reducers::{AdminReducer, AuthReducer, BookingReducer, OwnerReducer};
pub use session::SessionHolder;
pub use state::{
    AdminState, AuthState, BookingDialog, BookingState, ListControls, ListState, OwnerState,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
