//! Admin console reducer.
//!
//! Two paginated lists (users, reservations) with debounced search, plus
//! row mutations. Mutations apply optimistically: the row changes first,
//! the backend call follows, and a failure reverts the row and raises an
//! error toast. Every outcome raises exactly one toast, and each toast
//! schedules its own dismissal as a delayed effect.
//!
//! Search uses a cancellable delay per list: each keystroke restarts the
//! timer, and only a settled value that differs from the one already
//! applied triggers a reload.

use crate::actions::AdminAction;
use crate::demo;
use crate::environment::AdminEnvironment;
use crate::notify::ToastKind;
use crate::state::AdminState;
use parkdeck_api::{AdminApi, ListQuery, Role};
use parkdeck_core::effect::{Effect, EffectId};
use parkdeck_core::reducer::Reducer;
use parkdeck_core::{SmallVec, async_effect, cancellable, delay, smallvec};
use std::time::Duration;

const USERS_LOAD: EffectId = EffectId::from_static("admin.users.load");
const RESERVATIONS_LOAD: EffectId = EffectId::from_static("admin.reservations.load");
const USERS_SEARCH: EffectId = EffectId::from_static("admin.users.search");
const RESERVATIONS_SEARCH: EffectId = EffectId::from_static("admin.reservations.search");

/// How long a search box must stay quiet before the filter applies.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Admin console reducer.
#[derive(Debug, Clone)]
pub struct AdminReducer<A> {
    _phantom: std::marker::PhantomData<A>,
}

impl<A> AdminReducer<A> {
    /// Create an admin reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for AdminReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Reducer for AdminReducer<A>
where
    A: AdminApi + Clone + 'static,
{
    type State = AdminState;
    type Action = AdminAction;
    type Environment = AdminEnvironment<A>;

    #[allow(clippy::too_many_lines, clippy::cognitive_complexity)] // One arm per console action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Users list: load, page, search, sort
            // ═══════════════════════════════════════════════════════════════
            AdminAction::LoadUsers => {
                state.users.loading = true;
                smallvec![load_users(env, state.users.controls.query())]
            }

            AdminAction::UsersLoaded { page } => {
                state.users.loading = false;
                state.users.error = None;
                if page.is_empty() && state.users.controls.page == 0 && env.demo_fallback {
                    state.users.rows = demo::demo_admin_users();
                    state.users.total = state.users.rows.len() as u64;
                    state.users.demo_data = true;
                } else {
                    state.users.rows = page.items;
                    state.users.total = page.total;
                    state.users.demo_data = false;
                }
                smallvec![Effect::None]
            }

            AdminAction::UsersLoadFailed { message } => {
                state.users.loading = false;
                state.users.error = Some(message.clone());
                if env.demo_fallback {
                    state.users.rows = demo::demo_admin_users();
                    state.users.total = state.users.rows.len() as u64;
                    state.users.demo_data = true;
                }
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            AdminAction::UsersPageChanged { page } => {
                state.users.controls.page = page;
                state.users.loading = true;
                smallvec![load_users(env, state.users.controls.query())]
            }

            AdminAction::UsersPageSizeChanged { size } => {
                state.users.controls.size = size;
                state.users.controls.page = 0;
                state.users.loading = true;
                smallvec![load_users(env, state.users.controls.query())]
            }

            AdminAction::UsersSearchChanged { text } => {
                state.users.controls.search_input = text.clone();
                smallvec![cancellable! {
                    id: USERS_SEARCH,
                    effect: delay! {
                        duration: SEARCH_DEBOUNCE,
                        action: AdminAction::UsersSearchSettled { text }
                    }
                }]
            }

            AdminAction::UsersSearchSettled { text } => {
                if text == state.users.controls.applied_search {
                    return smallvec![Effect::None];
                }
                state.users.controls.applied_search = text;
                state.users.controls.page = 0;
                state.users.loading = true;
                smallvec![load_users(env, state.users.controls.query())]
            }

            AdminAction::UsersSortChanged { sort } => {
                state.users.controls.sort = sort;
                state.users.loading = true;
                smallvec![load_users(env, state.users.controls.query())]
            }

            // ═══════════════════════════════════════════════════════════════
            // Reservations list: load, page, search, sort
            // ═══════════════════════════════════════════════════════════════
            AdminAction::LoadReservations => {
                state.reservations.loading = true;
                smallvec![load_reservations(env, state.reservations.controls.query())]
            }

            AdminAction::ReservationsLoaded { page } => {
                state.reservations.loading = false;
                state.reservations.error = None;
                if page.is_empty() && state.reservations.controls.page == 0 && env.demo_fallback {
                    state.reservations.rows = demo::demo_admin_reservations();
                    state.reservations.total = state.reservations.rows.len() as u64;
                    state.reservations.demo_data = true;
                } else {
                    state.reservations.rows = page.items;
                    state.reservations.total = page.total;
                    state.reservations.demo_data = false;
                }
                smallvec![Effect::None]
            }

            AdminAction::ReservationsLoadFailed { message } => {
                state.reservations.loading = false;
                state.reservations.error = Some(message.clone());
                if env.demo_fallback {
                    state.reservations.rows = demo::demo_admin_reservations();
                    state.reservations.total = state.reservations.rows.len() as u64;
                    state.reservations.demo_data = true;
                }
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            AdminAction::ReservationsPageChanged { page } => {
                state.reservations.controls.page = page;
                state.reservations.loading = true;
                smallvec![load_reservations(env, state.reservations.controls.query())]
            }

            AdminAction::ReservationsPageSizeChanged { size } => {
                state.reservations.controls.size = size;
                state.reservations.controls.page = 0;
                state.reservations.loading = true;
                smallvec![load_reservations(env, state.reservations.controls.query())]
            }

            AdminAction::ReservationsSearchChanged { text } => {
                state.reservations.controls.search_input = text.clone();
                smallvec![cancellable! {
                    id: RESERVATIONS_SEARCH,
                    effect: delay! {
                        duration: SEARCH_DEBOUNCE,
                        action: AdminAction::ReservationsSearchSettled { text }
                    }
                }]
            }

            AdminAction::ReservationsSearchSettled { text } => {
                if text == state.reservations.controls.applied_search {
                    return smallvec![Effect::None];
                }
                state.reservations.controls.applied_search = text;
                state.reservations.controls.page = 0;
                state.reservations.loading = true;
                smallvec![load_reservations(env, state.reservations.controls.query())]
            }

            AdminAction::ReservationsSortChanged { sort } => {
                state.reservations.controls.sort = sort;
                state.reservations.loading = true;
                smallvec![load_reservations(env, state.reservations.controls.query())]
            }

            // ═══════════════════════════════════════════════════════════════
            // ToggleAdmin: flip the flag now, revert on rejection
            // ═══════════════════════════════════════════════════════════════
            AdminAction::ToggleAdmin { user_id } => {
                if state.busy_user_id == Some(user_id) {
                    tracing::debug!(user_id, "Mutation already in flight for this row");
                    return smallvec![Effect::None];
                }
                let Some(row) = state.users.rows.iter_mut().find(|r| r.id == user_id) else {
                    tracing::warn!(user_id, "Toggled user is not in the list");
                    return smallvec![Effect::None];
                };

                let previous = row.is_admin;
                let target = !previous;
                row.is_admin = target;
                state.busy_user_id = Some(user_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.set_admin(user_id, target).await {
                        Ok(()) => Some(AdminAction::AdminToggled { user_id }),
                        Err(e) => {
                            tracing::warn!(error = %e, user_id, "Admin toggle rejected");
                            Some(AdminAction::AdminToggleFailed {
                                user_id,
                                previous,
                                message: e.user_message("Failed to update user admin status"),
                            })
                        }
                    }
                }]
            }

            AdminAction::AdminToggled { user_id } => {
                clear_user_busy(state, user_id);
                smallvec![push_toast(
                    state,
                    ToastKind::Success,
                    "User admin status updated"
                )]
            }

            AdminAction::AdminToggleFailed {
                user_id,
                previous,
                message,
            } => {
                clear_user_busy(state, user_id);
                if let Some(row) = state.users.rows.iter_mut().find(|r| r.id == user_id) {
                    row.is_admin = previous;
                }
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // ToggleOwner: flip the role now, revert on rejection
            // ═══════════════════════════════════════════════════════════════
            AdminAction::ToggleOwner { user_id } => {
                if state.busy_user_id == Some(user_id) {
                    tracing::debug!(user_id, "Mutation already in flight for this row");
                    return smallvec![Effect::None];
                }
                let Some(row) = state.users.rows.iter_mut().find(|r| r.id == user_id) else {
                    tracing::warn!(user_id, "Toggled user is not in the list");
                    return smallvec![Effect::None];
                };

                let previous = row.parking_type;
                let make_owner = previous != Role::Owner;
                row.parking_type = if make_owner { Role::Owner } else { Role::User };
                state.busy_user_id = Some(user_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.set_owner(user_id, make_owner).await {
                        Ok(()) => Some(AdminAction::OwnerToggled {
                            user_id,
                            made_owner: make_owner,
                        }),
                        Err(e) => {
                            tracing::warn!(error = %e, user_id, "Owner toggle rejected");
                            Some(AdminAction::OwnerToggleFailed {
                                user_id,
                                previous,
                                message: e.user_message("Failed to update owner status"),
                            })
                        }
                    }
                }]
            }

            AdminAction::OwnerToggled {
                user_id,
                made_owner,
            } => {
                clear_user_busy(state, user_id);
                let message = if made_owner {
                    "User is now Owner"
                } else {
                    "User removed from Owner role"
                };
                smallvec![push_toast(state, ToastKind::Success, message)]
            }

            AdminAction::OwnerToggleFailed {
                user_id,
                previous,
                message,
            } => {
                clear_user_busy(state, user_id);
                if let Some(row) = state.users.rows.iter_mut().find(|r| r.id == user_id) {
                    row.parking_type = previous;
                }
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // UpdateRole: applied only once the backend accepts
            // ═══════════════════════════════════════════════════════════════
            AdminAction::UpdateRole { user_id, role } => {
                if state.busy_user_id == Some(user_id) {
                    tracing::debug!(user_id, "Mutation already in flight for this row");
                    return smallvec![Effect::None];
                }
                state.busy_user_id = Some(user_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.update_role(user_id, role).await {
                        Ok(()) => Some(AdminAction::RoleUpdated { user_id, role }),
                        Err(e) => {
                            tracing::warn!(error = %e, user_id, "Role update rejected");
                            Some(AdminAction::RoleUpdateFailed {
                                user_id,
                                message: e.user_message("Failed to update user role"),
                            })
                        }
                    }
                }]
            }

            AdminAction::RoleUpdated { user_id, role } => {
                clear_user_busy(state, user_id);
                if let Some(row) = state.users.rows.iter_mut().find(|r| r.id == user_id) {
                    if role == Role::Admin {
                        row.is_admin = true;
                    } else {
                        row.parking_type = role;
                    }
                }
                smallvec![push_toast(state, ToastKind::Success, "User role updated")]
            }

            AdminAction::RoleUpdateFailed { user_id, message } => {
                clear_user_busy(state, user_id);
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // DeleteUser: remove the row now, restore in place on rejection
            // ═══════════════════════════════════════════════════════════════
            AdminAction::DeleteUser { user_id } => {
                if state.busy_user_id == Some(user_id) {
                    tracing::debug!(user_id, "Mutation already in flight for this row");
                    return smallvec![Effect::None];
                }
                let Some(index) = state.users.rows.iter().position(|r| r.id == user_id) else {
                    tracing::warn!(user_id, "Deleted user is not in the list");
                    return smallvec![Effect::None];
                };

                let row = state.users.rows.remove(index);
                state.users.total = state.users.total.saturating_sub(1);
                state.busy_user_id = Some(user_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.delete_user(user_id).await {
                        Ok(()) => Some(AdminAction::UserDeleted { user_id }),
                        Err(e) => {
                            tracing::warn!(error = %e, user_id, "User deletion rejected");
                            Some(AdminAction::UserDeleteFailed {
                                user_id,
                                row,
                                index,
                                message: e.user_message("Failed to delete user"),
                            })
                        }
                    }
                }]
            }

            AdminAction::UserDeleted { user_id } => {
                clear_user_busy(state, user_id);
                state.users.loading = true;
                smallvec![
                    push_toast(state, ToastKind::Success, "User deleted"),
                    load_users(env, state.users.controls.query()),
                ]
            }

            AdminAction::UserDeleteFailed {
                user_id,
                row,
                index,
                message,
            } => {
                clear_user_busy(state, user_id);
                let at = index.min(state.users.rows.len());
                state.users.rows.insert(at, row);
                state.users.total += 1;
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // CancelReservation: remove the row now, restore on rejection
            // ═══════════════════════════════════════════════════════════════
            AdminAction::CancelReservation { reservation_id } => {
                if state.busy_reservation_id == Some(reservation_id) {
                    tracing::debug!(reservation_id, "Mutation already in flight for this row");
                    return smallvec![Effect::None];
                }
                let Some(index) = state
                    .reservations
                    .rows
                    .iter()
                    .position(|r| r.id == reservation_id)
                else {
                    tracing::warn!(reservation_id, "Cancelled reservation is not in the list");
                    return smallvec![Effect::None];
                };

                let row = state.reservations.rows.remove(index);
                state.reservations.total = state.reservations.total.saturating_sub(1);
                state.busy_reservation_id = Some(reservation_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.cancel_reservation(reservation_id).await {
                        Ok(()) => Some(AdminAction::ReservationCancelled { reservation_id }),
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                reservation_id,
                                "Reservation cancellation rejected"
                            );
                            Some(AdminAction::ReservationCancelFailed {
                                reservation_id,
                                row,
                                index,
                                message: e.user_message("Failed to cancel reservation"),
                            })
                        }
                    }
                }]
            }

            AdminAction::ReservationCancelled { reservation_id } => {
                if state.busy_reservation_id == Some(reservation_id) {
                    state.busy_reservation_id = None;
                }
                state.reservations.loading = true;
                smallvec![
                    push_toast(state, ToastKind::Success, "Reservation cancelled"),
                    load_reservations(env, state.reservations.controls.query()),
                ]
            }

            AdminAction::ReservationCancelFailed {
                reservation_id,
                row,
                index,
                message,
            } => {
                if state.busy_reservation_id == Some(reservation_id) {
                    state.busy_reservation_id = None;
                }
                let at = index.min(state.reservations.rows.len());
                state.reservations.rows.insert(at, row);
                state.reservations.total += 1;
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // RevokeParking: revoke, then refresh the reservations list
            // ═══════════════════════════════════════════════════════════════
            AdminAction::RevokeParking { parking_id } => {
                if state.revoking_parking_id == Some(parking_id) {
                    tracing::debug!(parking_id, "Revocation already in flight");
                    return smallvec![Effect::None];
                }
                state.revoking_parking_id = Some(parking_id);

                let admin = env.admin.clone();
                smallvec![async_effect! {
                    match admin.revoke_parking(parking_id).await {
                        Ok(()) => Some(AdminAction::ParkingRevoked { parking_id }),
                        Err(e) => {
                            tracing::warn!(error = %e, parking_id, "Parking revocation rejected");
                            Some(AdminAction::ParkingRevokeFailed {
                                parking_id,
                                message: e.user_message("Failed to revoke parking"),
                            })
                        }
                    }
                }]
            }

            AdminAction::ParkingRevoked { parking_id } => {
                if state.revoking_parking_id == Some(parking_id) {
                    state.revoking_parking_id = None;
                }
                state.reservations.loading = true;
                smallvec![
                    push_toast(state, ToastKind::Success, "Parking revoked"),
                    load_reservations(env, state.reservations.controls.query()),
                ]
            }

            AdminAction::ParkingRevokeFailed {
                parking_id,
                message,
            } => {
                if state.revoking_parking_id == Some(parking_id) {
                    state.revoking_parking_id = None;
                }
                smallvec![push_toast(state, ToastKind::Error, &message)]
            }

            // ═══════════════════════════════════════════════════════════════
            // DismissToast: the display timer ran out, or the user closed it
            // ═══════════════════════════════════════════════════════════════
            AdminAction::DismissToast { id } => {
                state.toasts.dismiss(id);
                smallvec![Effect::None]
            }
        }
    }
}

/// Queue a toast and schedule its dismissal.
fn push_toast(state: &mut AdminState, kind: ToastKind, message: &str) -> Effect<AdminAction> {
    let id = state.toasts.push(kind, message);
    delay! {
        duration: kind.display_duration(),
        action: AdminAction::DismissToast { id }
    }
}

fn load_users<A>(env: &AdminEnvironment<A>, query: ListQuery) -> Effect<AdminAction>
where
    A: AdminApi + Clone + 'static,
{
    let admin = env.admin.clone();
    cancellable! {
        id: USERS_LOAD,
        effect: async_effect! {
            match admin.users(&query).await {
                Ok(page) => Some(AdminAction::UsersLoaded { page }),
                Err(e) => {
                    tracing::warn!(error = %e, "Users list load failed");
                    Some(AdminAction::UsersLoadFailed {
                        message: e.user_message("Failed to load users"),
                    })
                }
            }
        }
    }
}

fn load_reservations<A>(env: &AdminEnvironment<A>, query: ListQuery) -> Effect<AdminAction>
where
    A: AdminApi + Clone + 'static,
{
    let admin = env.admin.clone();
    cancellable! {
        id: RESERVATIONS_LOAD,
        effect: async_effect! {
            match admin.reservations(&query).await {
                Ok(page) => Some(AdminAction::ReservationsLoaded { page }),
                Err(e) => {
                    tracing::warn!(error = %e, "Reservations list load failed");
                    Some(AdminAction::ReservationsLoadFailed {
                        message: e.user_message("Failed to load reservations"),
                    })
                }
            }
        }
    }
}

fn clear_user_busy(state: &mut AdminState, user_id: u64) {
    if state.busy_user_id == Some(user_id) {
        state.busy_user_id = None;
    }
}
