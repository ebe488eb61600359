//! Integration tests for Store action broadcasting
//!
//! Tests the action observation features that let callers submit a command
//! and wait for the success or failure action its effects produce.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use parkdeck_core::effect::Effect;
use parkdeck_core::reducer::Reducer;
use parkdeck_core::{SmallVec, smallvec};
use parkdeck_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
enum TestAction {
    /// Submit a booking command for a space
    SubmitBooking { space_id: u64 },
    /// Booking persisted, reload follows
    BookingSaved { space_id: u64 },
    /// Reload after the booking finished (terminal)
    ReloadFinished { space_id: u64 },
    /// Booking rejected (terminal)
    BookingRejected { space_id: u64, reason: String },
    /// Simple request command
    RefreshSession,
    /// Request completed
    SessionRefreshed { count: u32 },
    /// Schedule a dismissal
    DismissLater,
    /// Fired by the scheduled dismissal
    Dismissed,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    bookings: Vec<u64>,
    refreshes: u32,
}

#[derive(Clone)]
struct TestEnvironment;

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::SubmitBooking { space_id } => {
                smallvec![Effect::Future(Box::pin(async move {
                    // Simulate the round trip to the backend
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::BookingSaved { space_id })
                }))]
            }

            TestAction::BookingSaved { space_id } => {
                state.bookings.push(space_id);
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::ReloadFinished { space_id })
                }))]
            }

            TestAction::ReloadFinished { .. } | TestAction::BookingRejected { .. } => {
                smallvec![Effect::None]
            }

            TestAction::RefreshSession => {
                state.refreshes += 1;
                let count = state.refreshes;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(TestAction::SessionRefreshed { count })
                }))]
            }

            TestAction::SessionRefreshed { .. } => smallvec![Effect::None],

            TestAction::DismissLater => smallvec![Effect::Delay {
                duration: Duration::from_millis(10),
                action: Box::new(TestAction::Dismissed),
            }],

            TestAction::Dismissed => smallvec![Effect::None],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

/// Test `send_and_wait_for` with immediate response
#[tokio::test]
async fn test_send_and_wait_for_immediate() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::RefreshSession,
            |action| matches!(action, TestAction::SessionRefreshed { .. }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert!(matches!(
        result.unwrap(),
        TestAction::SessionRefreshed { count: 1 }
    ));
}

/// Test `send_and_wait_for` across a multi-step command flow
///
/// A booking command goes through persist and reload steps before the
/// terminal action arrives.
#[tokio::test]
async fn test_send_and_wait_for_command_flow() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::SubmitBooking { space_id: 42 },
            |action| matches!(action, TestAction::ReloadFinished { space_id: 42 }),
            Duration::from_secs(1),
        )
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), TestAction::ReloadFinished { space_id: 42 });

    let bookings = store.state(|s| s.bookings.clone()).await;
    assert_eq!(bookings, vec![42]);
}

/// Test `send_and_wait_for` timeout behavior
#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::SubmitBooking { space_id: 99 },
            |action| {
                // Wait for an action that will never come
                matches!(action, TestAction::BookingRejected { space_id: 99, .. })
            },
            Duration::from_millis(50),
        )
        .await;

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        parkdeck_runtime::StoreError::Timeout
    ));
}

/// Test concurrent waiters filtering by space id
///
/// Two commands run concurrently; each waiter must see only its own
/// terminal action.
#[tokio::test]
async fn test_concurrent_waiters_filter_by_space() {
    let store = Arc::new(Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment,
    ));

    let store1 = Arc::clone(&store);
    let handle1 = tokio::spawn(async move {
        store1
            .send_and_wait_for(
                TestAction::SubmitBooking { space_id: 1 },
                |action| matches!(action, TestAction::ReloadFinished { space_id: 1 }),
                Duration::from_secs(1),
            )
            .await
    });

    let store2 = Arc::clone(&store);
    let handle2 = tokio::spawn(async move {
        store2
            .send_and_wait_for(
                TestAction::SubmitBooking { space_id: 2 },
                |action| matches!(action, TestAction::ReloadFinished { space_id: 2 }),
                Duration::from_secs(1),
            )
            .await
    });

    let result1 = handle1.await.expect("Task 1 panicked");
    let result2 = handle2.await.expect("Task 2 panicked");

    assert_eq!(result1.unwrap(), TestAction::ReloadFinished { space_id: 1 });
    assert_eq!(result2.unwrap(), TestAction::ReloadFinished { space_id: 2 });
}

/// Test that initial actions are NOT broadcast
///
/// Only actions produced by effects reach observers; the command itself
/// does not.
#[tokio::test]
async fn test_initial_actions_not_broadcast() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let mut rx = store.subscribe_actions();

    store.send(TestAction::RefreshSession).await.ok();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let actions: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();

    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], TestAction::SessionRefreshed { .. }));
}

/// Test `Effect::Delay` broadcasting
///
/// Actions produced by `Effect::Delay` are broadcast just like those
/// from `Effect::Future`.
#[tokio::test]
async fn test_effect_delay_broadcasting() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);
    let mut rx = store.subscribe_actions();

    store.send(TestAction::DismissLater).await.ok();

    let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("Timeout waiting for delayed action")
        .expect("Channel closed");

    assert_eq!(action, TestAction::Dismissed);
}

/// Test multiple independent subscribers
#[tokio::test]
async fn test_multiple_independent_subscribers() {
    let store = Arc::new(Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment,
    ));

    let mut rx1 = store.subscribe_actions();
    let mut rx2 = store.subscribe_actions();

    store.send(TestAction::RefreshSession).await.ok();
    store.send(TestAction::RefreshSession).await.ok();

    tokio::time::sleep(Duration::from_millis(50)).await;

    let count1 = count_available_actions(&mut rx1);
    let count2 = count_available_actions(&mut rx2);

    assert_eq!(count1, 2);
    assert_eq!(count2, 2);
}

/// Test lagging subscriber behavior
///
/// A slow subscriber on a small buffer skips old actions but keeps
/// receiving new ones without blocking the store.
#[tokio::test]
async fn test_lagging_subscriber() {
    let store = Arc::new(Store::with_broadcast_capacity(
        TestState::default(),
        TestReducer,
        TestEnvironment,
        4, // Small capacity to trigger lagging
    ));

    let mut rx = store.subscribe_actions();

    for _ in 0..20 {
        store.send(TestAction::RefreshSession).await.ok();
    }

    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut received = 0;
    let mut lagged = false;

    loop {
        match rx.try_recv() {
            Ok(_) => received += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => {
                lagged = true;
            }
            Err(_) => break,
        }
    }

    assert!(lagged || received < 20, "Small buffer should drop actions");
    assert!(received > 0, "Should still receive recent actions");
}

/// Test `ChannelClosed` when the Store is dropped mid-wait
#[tokio::test]
async fn test_channel_closed_on_store_drop() {
    use tokio::sync::oneshot;

    let store = Arc::new(Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment,
    ));

    let (tx, rx) = oneshot::channel();

    let mut subscriber = store.subscribe_actions();
    let wait_handle = tokio::spawn(async move {
        tx.send(()).ok();
        subscriber.recv().await
    });

    rx.await.ok();
    tokio::time::sleep(Duration::from_millis(50)).await;

    drop(store);

    let result = wait_handle.await.expect("Task panicked");
    assert!(matches!(
        result,
        Err(tokio::sync::broadcast::error::RecvError::Closed)
    ));
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Count available actions in receiver without blocking
fn count_available_actions(rx: &mut tokio::sync::broadcast::Receiver<TestAction>) -> usize {
    let mut count = 0;
    loop {
        match rx.try_recv() {
            Ok(_) => count += 1,
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => {}
            Err(_) => break,
        }
    }
    count
}
