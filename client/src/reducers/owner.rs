//! Owner reducer.
//!
//! Lets a lot owner withdraw every spot for one date. The earliest date an
//! owner may withdraw depends on the local wall clock: before 17:00 the
//! next day is still allowed, from 17:00 the first allowed date moves one
//! day further out. The clock lives in the environment so tests can sit
//! right on the boundary.

use crate::actions::OwnerAction;
use crate::environment::OwnerEnvironment;
use crate::state::{OwnerOutcome, OwnerPhase, OwnerState};
use chrono::{Days, NaiveDate, Timelike};
use parkdeck_api::{OwnerApi, OwnerCancellationRequest};
use parkdeck_core::effect::Effect;
use parkdeck_core::environment::Clock;
use parkdeck_core::reducer::Reducer;
use parkdeck_core::{SmallVec, async_effect, smallvec};

/// Last hour of the day on which next-day withdrawal is still allowed.
const CUTOFF_HOUR: u32 = 17;

/// Owner reducer.
#[derive(Debug, Clone)]
pub struct OwnerReducer<O, C> {
    _phantom: std::marker::PhantomData<(O, C)>,
}

impl<O, C> OwnerReducer<O, C> {
    /// Create an owner reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<O, C> Default for OwnerReducer<O, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, C> Reducer for OwnerReducer<O, C>
where
    O: OwnerApi + Clone + 'static,
    C: Clock + Clone + 'static,
{
    type State = OwnerState;
    type Action = OwnerAction;
    type Environment = OwnerEnvironment<O, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Initialize: compute the earliest allowed date
            // ═══════════════════════════════════════════════════════════════
            OwnerAction::Initialize => {
                let min = minimum_date(&env.clock);
                *state = OwnerState {
                    phase: OwnerPhase::SelectingDate,
                    min_date: min,
                    selected_date: min,
                    submitting: false,
                    outcome: None,
                };
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // DateSelected: clamp to the minimum
            // ═══════════════════════════════════════════════════════════════
            OwnerAction::DateSelected { date } => {
                state.selected_date = date.max(state.min_date);
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // RequestCancellation / DismissConfirmation: the popup
            // ═══════════════════════════════════════════════════════════════
            OwnerAction::RequestCancellation => {
                if !state.submitting {
                    state.phase = OwnerPhase::Confirming;
                }
                smallvec![Effect::None]
            }

            OwnerAction::DismissConfirmation => {
                state.phase = OwnerPhase::SelectingDate;
                smallvec![Effect::None]
            }

            // ═══════════════════════════════════════════════════════════════
            // ConfirmCancellation: withdraw the selected date
            // ═══════════════════════════════════════════════════════════════
            OwnerAction::ConfirmCancellation => {
                if state.phase != OwnerPhase::Confirming || state.submitting {
                    tracing::warn!("Withdrawal confirmed outside the confirmation popup");
                    return smallvec![Effect::None];
                }

                state.phase = OwnerPhase::SelectingDate;
                state.submitting = true;
                state.outcome = None;

                let date = state.selected_date;
                let request = OwnerCancellationRequest {
                    cancellation_date: date,
                };
                let owner = env.owner.clone();

                smallvec![async_effect! {
                    match owner.cancel_availability(&request).await {
                        Ok(()) => Some(OwnerAction::CancellationSucceeded { date }),
                        Err(e) => {
                            tracing::warn!(error = %e, %date, "Availability withdrawal rejected");
                            Some(OwnerAction::CancellationFailed {
                                message: e.user_message(
                                    "Failed to cancel parking spot availability",
                                ),
                            })
                        }
                    }
                }]
            }

            OwnerAction::CancellationSucceeded { date } => {
                state.submitting = false;
                state.outcome = Some(OwnerOutcome {
                    success: true,
                    text: format!(
                        "Parking spot availability cancelled successfully for {date}"
                    ),
                });
                // A request can straddle the cutoff; recompute and re-clamp.
                state.min_date = minimum_date(&env.clock);
                state.selected_date = state.selected_date.max(state.min_date);
                smallvec![Effect::None]
            }

            OwnerAction::CancellationFailed { message } => {
                state.submitting = false;
                state.outcome = Some(OwnerOutcome {
                    success: false,
                    text: message,
                });
                smallvec![Effect::None]
            }
        }
    }
}

/// Earliest date an owner may withdraw: tomorrow before the cutoff, the
/// day after from the cutoff onward.
fn minimum_date<C: Clock>(clock: &C) -> NaiveDate {
    let now = clock.now_local();
    let days_ahead = if now.hour() >= CUTOFF_HOUR { 2 } else { 1 };
    now.date() + Days::new(days_ahead)
}
