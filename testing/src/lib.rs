//! # Parkdeck Testing
//!
//! Testing utilities and helpers for the Parkdeck client architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then API for reducer tests
//! - Assertion helpers for effects
//! - Store helpers for async flow tests
//!
//! ## Example
//!
//! ```ignore
//! use parkdeck_testing::test_clock;
//! use parkdeck_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_booking_flow() {
//!     let env = test_environment();
//!     let store = Store::new(BookingState::default(), BookingReducer, env);
//!
//!     store.send(BookingAction::LoadAvailability).await.ok();
//!
//!     let spots = store.state(|s| s.yard_spots.len()).await;
//!     assert!(spots > 0);
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use parkdeck_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, NaiveDateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible. The local
    /// wall-clock time can be pinned independently for tests that exercise
    /// cutoff-hour logic.
    ///
    /// # Example
    ///
    /// ```
    /// use parkdeck_testing::mocks::FixedClock;
    /// use parkdeck_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
        local: NaiveDateTime,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        ///
        /// The local wall-clock time is taken to be the same as the UTC
        /// wall-clock time. Use [`FixedClock::at_local`] when a test needs
        /// a specific local hour.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time,
                local: time.naive_utc(),
            }
        }

        /// Create a fixed clock pinned to a specific local wall-clock time
        ///
        /// Cutoff tests use this to sit just before or after 17:00.
        #[must_use]
        pub const fn at_local(local: NaiveDateTime) -> Self {
            Self {
                time: local.and_utc(),
                local,
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }

        fn now_local(&self) -> NaiveDateTime {
            self.local
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Store helpers for async flow tests
pub mod helpers {
    use parkdeck_core::reducer::Reducer;
    use parkdeck_runtime::{Store, StoreError};
    use std::time::Duration;

    /// Send an action and wait for the effects it spawned to finish
    ///
    /// Waits only for effects spawned directly by this action; feedback
    /// actions run under their own handles. Use
    /// [`Store::send_and_wait_for`] when a test needs to observe a whole
    /// flow.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the effects do not finish within
    /// the timeout, or passes through any error from `send` itself.
    pub async fn send_settled<S, A, E, R>(
        store: &Store<S, A, E, R>,
        action: A,
        timeout: Duration,
    ) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + Clone + 'static,
    {
        let mut handle = store.send(action).await?;
        handle
            .wait_with_timeout(timeout)
            .await
            .map_err(|()| StoreError::Timeout)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    #[allow(clippy::expect_used)] // Test fixture dates always exist
    fn test_fixed_clock_pinned_local_hour() {
        let local = NaiveDate::from_ymd_opt(2025, 6, 10)
            .expect("valid date")
            .and_hms_opt(16, 59, 0)
            .expect("valid time");
        let clock = FixedClock::at_local(local);

        assert_eq!(clock.now_local(), local);
        assert_eq!(clock.now_local().and_utc(), clock.now());
    }
}
