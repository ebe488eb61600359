//! Booking reducer.
//!
//! Drives the availability grid: loading spaces and the user's own
//! reservations for a date, booking a free spot through a confirmation
//! dialog, and cancelling an existing reservation.
//!
//! Availability and the reservation list load as two cancellable effects
//! under fixed ids. Picking a new date re-issues both, which cancels
//! whatever is still in flight for the old date, so a slow response for a
//! stale date can never overwrite a fresh grid.

use crate::actions::BookingAction;
use crate::demo;
use crate::environment::BookingEnvironment;
use crate::state::{BookingDialog, BookingState};
use chrono::NaiveDate;
use parkdeck_api::{ParkingApi, ReservationRequest, ReservationsApi, SpotStatus};
use parkdeck_core::effect::{Effect, EffectId};
use parkdeck_core::reducer::Reducer;
use parkdeck_core::{SmallVec, async_effect, cancellable, smallvec};

const AVAILABILITY_LOAD: EffectId = EffectId::from_static("booking.availability");
const RESERVATIONS_LOAD: EffectId = EffectId::from_static("booking.reservations");

/// Booking reducer.
#[derive(Debug, Clone)]
pub struct BookingReducer<P, R> {
    _phantom: std::marker::PhantomData<(P, R)>,
}

impl<P, R> BookingReducer<P, R> {
    /// Create a booking reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<P, R> Default for BookingReducer<P, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, R> Reducer for BookingReducer<P, R>
where
    P: ParkingApi + Clone + 'static,
    R: ReservationsApi + Clone + 'static,
{
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<P, R>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // LoadAvailability: fetch the grid and the user's reservations
            // ═══════════════════════════════════════════════════════════════
            BookingAction::LoadAvailability { date } => {
                state.selected_date = date;
                state.loading = true;
                state.error = None;
                load_effects(env, date)
            }

            BookingAction::AvailabilityLoaded { spaces } => {
                state.loading = false;
                state.error = None;
                state.demo_data = false;
                state.set_spaces(spaces);
                smallvec![Effect::None]
            }

            BookingAction::AvailabilityFailed { message } => {
                state.loading = false;
                state.error = Some(message);
                if env.demo_fallback {
                    state.set_spaces(demo::demo_spaces());
                    state.demo_data = true;
                }
                smallvec![Effect::None]
            }

            BookingAction::MyReservationsLoaded { reservations } => {
                state.my_reservations = reservations;
                smallvec![Effect::None]
            }

            // The grid still renders without the reservation list; spots the
            // user owns just lose their cancel affordance until a reload.
            BookingAction::MyReservationsFailed { message } => {
                tracing::warn!(%message, "Reservation list load failed");
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // SelectSpot: open the dialog matching the spot's status
            // ═══════════════════════════════════════════════════════════════
            BookingAction::SelectSpot { space_id } => {
                let Some(space) = state.space(space_id) else {
                    tracing::warn!(space_id, "Clicked space is not in the grid");
                    return smallvec![Effect::None];
                };
                let space = space.clone();

                match space.status {
                    SpotStatus::Available => {
                        state.dialog = BookingDialog::ConfirmBooking { space, error: None };
                    }
                    SpotStatus::MyReservation => {
                        state.dialog = BookingDialog::ConfirmCancel { space };
                    }
                    SpotStatus::Occupied | SpotStatus::OwnerCancelled => {}
                }
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ConfirmBooking: reserve the spot in the open dialog
            // ═══════════════════════════════════════════════════════════════
            BookingAction::ConfirmBooking => {
                if state.booking {
                    return smallvec![Effect::None];
                }
                let BookingDialog::ConfirmBooking { space, .. } = &state.dialog else {
                    tracing::warn!("Booking confirmed with no booking dialog open");
                    return smallvec![Effect::None];
                };

                state.booking = true;
                let request = ReservationRequest {
                    parking_space_id: space.id,
                    reservation_date: state.selected_date,
                };
                let reservations = env.reservations.clone();

                smallvec![async_effect! {
                    match reservations.create(&request).await {
                        Ok(_) => Some(BookingAction::BookingSucceeded),
                        Err(e) => {
                            tracing::warn!(error = %e, "Booking rejected");
                            Some(BookingAction::BookingFailed {
                                message: e.user_message("Failed to book parking space"),
                            })
                        }
                    }
                }]
            }

            BookingAction::BookingSucceeded => {
                state.booking = false;
                state.dialog = BookingDialog::None;
                state.error = None;
                state.notice = Some(
                    "Parking space booked successfully! (Email notification will be sent)"
                        .to_string(),
                );
                load_effects(env, state.selected_date)
            }

            // The dialog stays open with the message so the user can retry
            // or give up; the grid behind it is unchanged.
            BookingAction::BookingFailed { message } => {
                state.booking = false;
                if let BookingDialog::ConfirmBooking { error, .. } = &mut state.dialog {
                    *error = Some(message);
                } else {
                    state.error = Some(message);
                }
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ConfirmCancel: cancel the reservation in the open dialog
            // ═══════════════════════════════════════════════════════════════
            BookingAction::ConfirmCancel => {
                if state.cancelling {
                    return smallvec![Effect::None];
                }
                let BookingDialog::ConfirmCancel { space } = &state.dialog else {
                    tracing::warn!("Cancellation confirmed with no cancel dialog open");
                    return smallvec![Effect::None];
                };

                let Some(reservation) = state.reservation_for(space.id, state.selected_date)
                else {
                    state.dialog = BookingDialog::None;
                    state.error =
                        Some("Reservation not found. Please try refreshing the page.".to_string());
                    return smallvec![Effect::None];
                };

                let reservation_id = reservation.id;
                state.cancelling = true;
                smallvec![cancel_effect(env, reservation_id)]
            }

            BookingAction::CancelFromList { reservation_id } => {
                if state.cancelling {
                    return smallvec![Effect::None];
                }
                state.cancelling = true;
                smallvec![cancel_effect(env, reservation_id)]
            }

            BookingAction::CancelSucceeded => {
                state.cancelling = false;
                state.dialog = BookingDialog::None;
                state.error = None;
                state.notice = Some("Reservation cancelled successfully!".to_string());
                load_effects(env, state.selected_date)
            }

            BookingAction::CancelFailed { message } => {
                state.cancelling = false;
                state.dialog = BookingDialog::None;
                state.error = Some(message);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // DismissDialog: close without confirming
            // ═══════════════════════════════════════════════════════════════
            BookingAction::DismissDialog => {
                state.dialog = BookingDialog::None;
                smallvec![Effect::None]
            }
        }
    }
}

/// The two cancellable fetches behind the grid. Re-issuing them under the
/// same ids supersedes any still-running load.
fn load_effects<P, R>(
    env: &BookingEnvironment<P, R>,
    date: NaiveDate,
) -> SmallVec<[Effect<BookingAction>; 4]>
where
    P: ParkingApi + Clone + 'static,
    R: ReservationsApi + Clone + 'static,
{
    let parking = env.parking.clone();
    let reservations = env.reservations.clone();

    smallvec![
        cancellable! {
            id: AVAILABILITY_LOAD,
            effect: async_effect! {
                match parking.spaces(date).await {
                    Ok(spaces) => Some(BookingAction::AvailabilityLoaded { spaces }),
                    Err(e) => {
                        tracing::warn!(error = %e, %date, "Availability load failed");
                        Some(BookingAction::AvailabilityFailed {
                            message: e.user_message("Failed to load parking spaces"),
                        })
                    }
                }
            }
        },
        cancellable! {
            id: RESERVATIONS_LOAD,
            effect: async_effect! {
                match reservations.mine().await {
                    Ok(reservations) => {
                        Some(BookingAction::MyReservationsLoaded { reservations })
                    }
                    Err(e) => Some(BookingAction::MyReservationsFailed {
                        message: e.to_string(),
                    }),
                }
            }
        },
    ]
}

fn cancel_effect<P, R>(env: &BookingEnvironment<P, R>, reservation_id: u64) -> Effect<BookingAction>
where
    P: ParkingApi + Clone + 'static,
    R: ReservationsApi + Clone + 'static,
{
    let reservations = env.reservations.clone();
    async_effect! {
        match reservations.cancel(reservation_id).await {
            Ok(()) => Some(BookingAction::CancelSucceeded),
            Err(e) => {
                tracing::warn!(error = %e, reservation_id, "Cancellation rejected");
                Some(BookingAction::CancelFailed {
                    message: e.user_message("Failed to cancel reservation"),
                })
            }
        }
    }
}
