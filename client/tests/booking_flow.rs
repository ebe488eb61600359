//! Integration tests for the booking flow.
//!
//! Drives the booking reducer through a real store with mock providers,
//! so effect execution, supersession, and feedback actions all run the
//! way they do in production.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::NaiveDate;
use parkdeck_api::mocks::{MockParkingApi, MockReservationsApi};
use parkdeck_api::{ApiError, ParkingSpace, Reservation, SpotStatus, Zone};
use parkdeck_client::{
    BookingAction, BookingDialog, BookingEnvironment, BookingReducer, BookingState,
};
use parkdeck_runtime::Store;
use parkdeck_testing::helpers::send_settled;
use std::time::Duration;

const SETTLE: Duration = Duration::from_secs(2);

type BookingStore = Store<
    BookingState,
    BookingAction,
    BookingEnvironment<MockParkingApi, MockReservationsApi>,
    BookingReducer<MockParkingApi, MockReservationsApi>,
>;

fn space(id: u64, spot_number: u32, zone: Zone, status: SpotStatus) -> ParkingSpace {
    ParkingSpace {
        id,
        spot_number,
        parking_type: zone,
        status,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn new_store(
    parking: MockParkingApi,
    reservations: MockReservationsApi,
    demo_fallback: bool,
) -> BookingStore {
    let env = BookingEnvironment::new(parking, reservations, demo_fallback);
    Store::new(BookingState::default(), BookingReducer::new(), env)
}

#[tokio::test]
async fn test_load_availability_fills_both_zones() {
    let parking = MockParkingApi::with_spaces(vec![
        space(3, 2, Zone::Garage, SpotStatus::Available),
        space(1, 2, Zone::Yard, SpotStatus::Available),
        space(2, 1, Zone::Yard, SpotStatus::Occupied),
        space(4, 1, Zone::Garage, SpotStatus::MyReservation),
    ]);
    let reservations = MockReservationsApi::with_reservations(vec![Reservation {
        id: 41,
        parking_space_id: 4,
        reservation_date: day().to_string(),
        spot_number: Some(1),
        status: Some("ACTIVE".to_string()),
    }]);
    let store = new_store(parking, reservations, false);

    send_settled(&store, BookingAction::LoadAvailability { date: day() }, SETTLE)
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(!state.demo_data);
    assert_eq!(state.selected_date, day());

    // Zones split and sorted by spot number
    let yard: Vec<u32> = state.yard_spaces.iter().map(|s| s.spot_number).collect();
    let garage: Vec<u32> = state.garage_spaces.iter().map(|s| s.spot_number).collect();
    assert_eq!(yard, vec![1, 2]);
    assert_eq!(garage, vec![1, 2]);

    assert_eq!(state.my_reservations.len(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_demo_rows() {
    let parking = MockParkingApi::failing(ApiError::RequestFailed("connection refused".to_string()));
    let store = new_store(parking, MockReservationsApi::new(), true);

    send_settled(&store, BookingAction::LoadAvailability { date: day() }, SETTLE)
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.demo_data);
    assert_eq!(state.yard_spaces.len(), 50);
    assert_eq!(state.garage_spaces.len(), 100);
    // The error stays visible alongside the generated rows
    assert_eq!(state.error.as_deref(), Some("Failed to load parking spaces"));
}

#[tokio::test]
async fn test_booking_a_free_spot_end_to_end() {
    let parking = MockParkingApi::with_spaces(vec![space(7, 7, Zone::Yard, SpotStatus::Available)]);
    let reservations = MockReservationsApi::new();
    let store = new_store(parking.clone(), reservations.clone(), false);

    send_settled(&store, BookingAction::LoadAvailability { date: day() }, SETTLE)
        .await
        .unwrap();
    send_settled(&store, BookingAction::SelectSpot { space_id: 7 }, SETTLE)
        .await
        .unwrap();
    assert!(store.state(|s| s.dialog.is_open()).await);

    // After the booking lands, the backend reports the spot as ours
    parking
        .set_spaces(vec![space(7, 7, Zone::Yard, SpotStatus::MyReservation)])
        .unwrap();

    let outcome = store
        .send_and_wait_for(
            BookingAction::ConfirmBooking,
            |a| {
                matches!(
                    a,
                    BookingAction::BookingSucceeded | BookingAction::BookingFailed { .. }
                )
            },
            SETTLE,
        )
        .await
        .unwrap();
    assert_eq!(outcome, BookingAction::BookingSucceeded);

    // Let the success action reduce and the follow-up reloads land
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.dialog, BookingDialog::None);
    assert!(!state.booking);
    assert_eq!(
        state.notice.as_deref(),
        Some("Parking space booked successfully! (Email notification will be sent)")
    );

    let requests = reservations.created_requests().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].parking_space_id, 7);
    assert_eq!(requests[0].reservation_date, day());

    // Initial load plus the reload after booking
    assert_eq!(parking.queried_dates().unwrap(), vec![day(), day()]);

    // The reloaded grid no longer shows the spot as available
    assert_eq!(state.yard_spaces[0].status, SpotStatus::MyReservation);
    assert_eq!(state.my_reservations.len(), 1);
}

#[tokio::test]
async fn test_booking_conflict_keeps_the_dialog_open() {
    let parking = MockParkingApi::with_spaces(vec![space(7, 7, Zone::Yard, SpotStatus::Available)]);
    let reservations = MockReservationsApi::failing(ApiError::Rejected {
        status: 409,
        message: "Space is already reserved for this date".to_string(),
    });
    let store = new_store(parking, reservations, false);

    send_settled(&store, BookingAction::LoadAvailability { date: day() }, SETTLE)
        .await
        .unwrap();
    send_settled(&store, BookingAction::SelectSpot { space_id: 7 }, SETTLE)
        .await
        .unwrap();

    let outcome = store
        .send_and_wait_for(
            BookingAction::ConfirmBooking,
            |a| {
                matches!(
                    a,
                    BookingAction::BookingSucceeded | BookingAction::BookingFailed { .. }
                )
            },
            SETTLE,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, BookingAction::BookingFailed { .. }));

    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = store.state(Clone::clone).await;
    assert!(!state.booking);
    match &state.dialog {
        BookingDialog::ConfirmBooking { space, error } => {
            assert_eq!(space.id, 7);
            assert_eq!(
                error.as_deref(),
                Some("Space is already reserved for this date")
            );
        }
        other => panic!("expected the booking dialog to stay open, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelling_own_reservation_from_the_grid() {
    let parking =
        MockParkingApi::with_spaces(vec![space(9, 4, Zone::Yard, SpotStatus::MyReservation)]);
    // Backend date carries a time component; matching must normalize it
    let reservations = MockReservationsApi::with_reservations(vec![Reservation {
        id: 41,
        parking_space_id: 9,
        reservation_date: format!("{}T00:00:00", day()),
        spot_number: Some(4),
        status: Some("ACTIVE".to_string()),
    }]);
    let store = new_store(parking, reservations.clone(), false);

    send_settled(&store, BookingAction::LoadAvailability { date: day() }, SETTLE)
        .await
        .unwrap();
    send_settled(&store, BookingAction::SelectSpot { space_id: 9 }, SETTLE)
        .await
        .unwrap();
    assert!(matches!(
        store.state(|s| s.dialog.clone()).await,
        BookingDialog::ConfirmCancel { .. }
    ));

    let outcome = store
        .send_and_wait_for(
            BookingAction::ConfirmCancel,
            |a| {
                matches!(
                    a,
                    BookingAction::CancelSucceeded | BookingAction::CancelFailed { .. }
                )
            },
            SETTLE,
        )
        .await
        .unwrap();
    assert_eq!(outcome, BookingAction::CancelSucceeded);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.dialog, BookingDialog::None);
    assert_eq!(
        state.notice.as_deref(),
        Some("Reservation cancelled successfully!")
    );
    assert_eq!(reservations.cancelled_ids().unwrap(), vec![41]);

    // The reloaded reservation list no longer carries it
    assert!(state.my_reservations.is_empty());
}
