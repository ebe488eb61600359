//! # Parkdeck Core
//!
//! Core traits and types for the Parkdeck client architecture.
//!
//! This crate provides the fundamental abstractions for building the
//! reservation client's view-state machines using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: View state for a feature (booking grid, owner workflow, admin lists)
//! - **Action**: All possible inputs to a reducer (user intents, API outcomes, timers)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use parkdeck_core::{Effect, SmallVec, reducer::Reducer, smallvec};
//!
//! #[derive(Clone, Debug)]
//! struct GridState {
//!     spots: Vec<Spot>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum GridAction {
//!     Load,
//!     Loaded(Vec<Spot>),
//! }
//!
//! impl Reducer for GridReducer {
//!     type State = GridState;
//!     type Action = GridAction;
//!     type Environment = GridEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut GridState,
//!         action: GridAction,
//!         env: &GridEnvironment,
//!     ) -> SmallVec<[Effect<GridAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The view state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for BookingReducer {
    ///     type State = BookingState;
    ///     type Action = BookingAction;
    ///     type Environment = BookingEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut BookingState,
    ///         action: BookingAction,
    ///         env: &BookingEnvironment,
    ///     ) -> SmallVec<[Effect<BookingAction>; 4]> {
    ///         match action {
    ///             BookingAction::LoadAvailability => {
    ///                 // Business logic here
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime. Most actions produce zero or
        /// one effect, so the list is inline up to four entries.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and cancellable.
pub mod effect {
    use std::borrow::Cow;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier for a cancellable effect.
    ///
    /// Starting a new effect under an id that is already in flight cancels
    /// the predecessor (latest wins). Ids are plain strings so features can
    /// scope them however they like (`"booking.load"`, `"admin.users.search"`).
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct EffectId(Cow<'static, str>);

    impl EffectId {
        /// Create an effect id from a static string
        #[must_use]
        pub const fn from_static(id: &'static str) -> Self {
            Self(Cow::Borrowed(id))
        }

        /// Create an effect id from an owned or borrowed string
        #[must_use]
        pub fn new(id: impl Into<String>) -> Self {
            Self(Cow::Owned(id.into()))
        }

        /// The id as a string slice
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl std::fmt::Display for EffectId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, debounce)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// An effect that can be superseded or cancelled by id
        ///
        /// The runtime registers the id before running the inner effect.
        /// Re-issuing a `Cancellable` under the same id cancels the in-flight
        /// predecessor; a cancelled effect delivers no action.
        Cancellable {
            /// Registration key for the inner effect
            id: EffectId,
            /// The effect to run under that key
            effect: Box<Effect<Action>>,
        },

        /// Cancel the in-flight effect registered under this id, if any
        Cancel(EffectId),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { id, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("id", id)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(id) => f.debug_tuple("Effect::Cancel").field(id).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Wrap an effect so it can be superseded or cancelled by id
        #[must_use]
        pub fn cancellable(id: EffectId, effect: Effect<Action>) -> Effect<Action> {
            Effect::Cancellable {
                id,
                effect: Box::new(effect),
            }
        }

        /// Cancel whatever is in flight under the given id
        #[must_use]
        pub const fn cancel(id: EffectId) -> Effect<Action> {
            Effect::Cancel(id)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Local, NaiveDateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// `now_local` exists because the owner cutoff rule (17:00) is a
    /// local-time boundary; tests pin it with a fixed clock.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock::new();
    /// let today = clock.now_local().date();
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(some_instant);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;

        /// Get the current wall-clock time in the local timezone
        fn now_local(&self) -> NaiveDateTime;
    }

    /// Production clock backed by the operating system
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl SystemClock {
        /// Create a new system clock
        #[must_use]
        pub const fn new() -> Self {
            Self
        }
    }

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }

        fn now_local(&self) -> NaiveDateTime {
            Local::now().naive_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectId};

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ping,
    }

    #[test]
    fn test_effect_debug_formats() {
        let none: Effect<TestAction> = Effect::None;
        assert_eq!(format!("{none:?}"), "Effect::None");

        let future: Effect<TestAction> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{future:?}"), "Effect::Future(<future>)");

        let cancel: Effect<TestAction> = Effect::cancel(EffectId::from_static("grid.load"));
        assert!(format!("{cancel:?}").contains("grid.load"));
    }

    #[test]
    #[allow(clippy::panic)] // Test assertion
    fn test_cancellable_wraps_inner_effect() {
        let effect: Effect<TestAction> = Effect::cancellable(
            EffectId::from_static("grid.load"),
            Effect::Future(Box::pin(async { Some(TestAction::Ping) })),
        );

        match effect {
            Effect::Cancellable { id, effect } => {
                assert_eq!(id, EffectId::from_static("grid.load"));
                assert!(matches!(*effect, Effect::Future(_)));
            },
            other => panic!("expected Cancellable, got {other:?}"),
        }
    }

    #[test]
    fn test_effect_id_equality_across_constructors() {
        assert_eq!(
            EffectId::from_static("admin.users.search"),
            EffectId::new(String::from("admin.users.search"))
        );
        assert_eq!(EffectId::from_static("a").as_str(), "a");
    }

    #[test]
    fn test_merge_and_chain() {
        let merged: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(merged, Effect::Parallel(ref effects) if effects.len() == 2));

        let chained: Effect<TestAction> = Effect::chain(vec![Effect::None]);
        assert!(matches!(chained, Effect::Sequential(ref effects) if effects.len() == 1));
    }
}
