//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from
//! reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use parkdeck_core::async_effect;
///
/// async_effect! {
///     let spaces = api.spaces_for_date(date).await;
///     Some(BookingAction::AvailabilityLoaded(spaces))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use parkdeck_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(300),
///     action: AdminAction::SearchSettled
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Create an `Effect::Cancellable` wrapping another effect
///
/// Re-issuing under the same id supersedes the in-flight effect, which is
/// how debounce and latest-request-wins reloads are expressed.
///
/// # Example
///
/// ```rust,ignore
/// use parkdeck_core::{cancellable, async_effect};
///
/// cancellable! {
///     id: EffectId::from_static("booking.load"),
///     effect: async_effect! {
///         Some(BookingAction::AvailabilityLoaded(api.spaces_for_date(date).await?))
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
        TimeoutExpired,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            // Simulate async work
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::TimeoutExpired
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn test_cancellable_macro() {
        let effect: Effect<TestAction> = cancellable! {
            id: EffectId::from_static("test.reload"),
            effect: delay! {
                duration: Duration::from_millis(300),
                action: TestAction::TimeoutExpired
            }
        };

        assert!(matches!(effect, Effect::Cancellable { .. }));
    }
}
