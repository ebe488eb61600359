//! Actions for every screen of the client.
//!
//! Actions are either user intents (clicks, typing, submits) or events fed
//! back by the effect executor when a request resolves. Feedback events are
//! named in the past tense.

use crate::state::{LoginForm, RegisterForm};
use chrono::NaiveDate;
use parkdeck_api::{
    AdminReservationRow, AdminUserRow, Page, ParkingSpace, Reservation, Role, Session,
};

// ═══════════════════════════════════════════════════════════════════════
// Authentication
// ═══════════════════════════════════════════════════════════════════════

/// Actions of the login and registration screens.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// The login form contents changed.
    LoginFormChanged {
        /// New form contents.
        form: LoginForm,
    },

    /// The registration form contents changed.
    RegisterFormChanged {
        /// New form contents.
        form: RegisterForm,
    },

    /// User submitted the login form.
    SubmitLogin,

    /// User submitted the registration form.
    SubmitRegister,

    /// Login succeeded and the session was persisted.
    ///
    /// This is an **event** produced by the effect executor.
    LoginSucceeded {
        /// The authenticated session.
        session: Session,
    },

    /// Login failed.
    ///
    /// This is an **event** produced by the effect executor.
    LoginFailed {
        /// Message to show above the form.
        message: String,
    },

    /// Registration succeeded; the user is logged in.
    ///
    /// This is an **event** produced by the effect executor.
    RegisterSucceeded {
        /// The authenticated session.
        session: Session,
    },

    /// Registration failed.
    ///
    /// This is an **event** produced by the effect executor.
    RegisterFailed {
        /// Message to show above the form.
        message: String,
    },

    /// User asked to log out.
    Logout,

    /// Stored credentials were wiped.
    ///
    /// This is an **event** produced by the effect executor.
    LoggedOut,
}

// ═══════════════════════════════════════════════════════════════════════
// Booking
// ═══════════════════════════════════════════════════════════════════════

/// Actions of the booking screen.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    /// Load availability for a date. Also fired when the user picks a new
    /// date; an in-flight load for the old date is cancelled.
    LoadAvailability {
        /// Date to show.
        date: NaiveDate,
    },

    /// Availability arrived.
    ///
    /// This is an **event** produced by the effect executor.
    AvailabilityLoaded {
        /// All spaces with their status for the selected date.
        spaces: Vec<ParkingSpace>,
    },

    /// Availability could not be loaded.
    ///
    /// This is an **event** produced by the effect executor.
    AvailabilityFailed {
        /// Message to surface.
        message: String,
    },

    /// The user's reservation list arrived.
    ///
    /// This is an **event** produced by the effect executor.
    MyReservationsLoaded {
        /// All of the user's reservations.
        reservations: Vec<Reservation>,
    },

    /// The user's reservation list could not be loaded.
    ///
    /// This is an **event** produced by the effect executor.
    MyReservationsFailed {
        /// Message for the log; the grid still renders.
        message: String,
    },

    /// User clicked a spot in the grid.
    SelectSpot {
        /// The clicked space.
        space_id: u64,
    },

    /// User confirmed the booking dialog.
    ConfirmBooking,

    /// The booking went through.
    ///
    /// This is an **event** produced by the effect executor.
    BookingSucceeded,

    /// The booking was rejected.
    ///
    /// This is an **event** produced by the effect executor.
    BookingFailed {
        /// Message shown inside the still-open dialog.
        message: String,
    },

    /// User confirmed the cancellation dialog.
    ConfirmCancel,

    /// User cancelled a reservation from the reservation list, outside the
    /// grid.
    CancelFromList {
        /// The reservation to cancel.
        reservation_id: u64,
    },

    /// The cancellation went through.
    ///
    /// This is an **event** produced by the effect executor.
    CancelSucceeded,

    /// The cancellation failed.
    ///
    /// This is an **event** produced by the effect executor.
    CancelFailed {
        /// Message to surface.
        message: String,
    },

    /// User closed the dialog without confirming.
    DismissDialog,
}

// ═══════════════════════════════════════════════════════════════════════
// Owner
// ═══════════════════════════════════════════════════════════════════════

/// Actions of the owner screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerAction {
    /// Screen opened; compute the earliest allowed date.
    Initialize,

    /// User picked a date.
    DateSelected {
        /// The picked date; clamped to the minimum when too early.
        date: NaiveDate,
    },

    /// User asked to withdraw the selected date.
    RequestCancellation,

    /// User confirmed the withdrawal.
    ConfirmCancellation,

    /// User closed the confirmation popup.
    DismissConfirmation,

    /// The withdrawal went through.
    ///
    /// This is an **event** produced by the effect executor.
    CancellationSucceeded {
        /// The withdrawn date.
        date: NaiveDate,
    },

    /// The withdrawal failed.
    ///
    /// This is an **event** produced by the effect executor.
    CancellationFailed {
        /// Message for the banner.
        message: String,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// Admin
// ═══════════════════════════════════════════════════════════════════════

/// Actions of the admin console.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    // ─── Users list ───
    /// Load the users list with the current controls.
    LoadUsers,

    /// A users page arrived.
    ///
    /// This is an **event** produced by the effect executor.
    UsersLoaded {
        /// The page of rows.
        page: Page<AdminUserRow>,
    },

    /// The users list could not be loaded.
    ///
    /// This is an **event** produced by the effect executor.
    UsersLoadFailed {
        /// Message for the toast.
        message: String,
    },

    /// User flipped to another users page.
    UsersPageChanged {
        /// Zero-indexed page.
        page: u32,
    },

    /// User changed the users page size.
    UsersPageSizeChanged {
        /// Rows per page.
        size: u32,
    },

    /// A keystroke in the users search box.
    UsersSearchChanged {
        /// Current box contents.
        text: String,
    },

    /// The users search box went quiet.
    ///
    /// This is an **event** produced by the effect executor after the
    /// debounce interval.
    UsersSearchSettled {
        /// The settled text.
        text: String,
    },

    /// User changed the users sort column or direction.
    UsersSortChanged {
        /// Sort spec as `field,direction`, `None` to clear.
        sort: Option<String>,
    },

    // ─── Reservations list ───
    /// Load the reservations list with the current controls.
    LoadReservations,

    /// A reservations page arrived.
    ///
    /// This is an **event** produced by the effect executor.
    ReservationsLoaded {
        /// The page of rows.
        page: Page<AdminReservationRow>,
    },

    /// The reservations list could not be loaded.
    ///
    /// This is an **event** produced by the effect executor.
    ReservationsLoadFailed {
        /// Message for the toast.
        message: String,
    },

    /// User flipped to another reservations page.
    ReservationsPageChanged {
        /// Zero-indexed page.
        page: u32,
    },

    /// User changed the reservations page size.
    ReservationsPageSizeChanged {
        /// Rows per page.
        size: u32,
    },

    /// A keystroke in the reservations search box.
    ReservationsSearchChanged {
        /// Current box contents.
        text: String,
    },

    /// The reservations search box went quiet.
    ///
    /// This is an **event** produced by the effect executor after the
    /// debounce interval.
    ReservationsSearchSettled {
        /// The settled text.
        text: String,
    },

    /// User changed the reservations sort column or direction.
    ReservationsSortChanged {
        /// Sort spec as `field,direction`, `None` to clear.
        sort: Option<String>,
    },

    // ─── User mutations ───
    /// Flip a user's admin flag, optimistically.
    ToggleAdmin {
        /// Target user.
        user_id: u64,
    },

    /// The admin flag change was accepted.
    ///
    /// This is an **event** produced by the effect executor.
    AdminToggled {
        /// Target user.
        user_id: u64,
    },

    /// The admin flag change was rejected; the row is reverted.
    ///
    /// This is an **event** produced by the effect executor.
    AdminToggleFailed {
        /// Target user.
        user_id: u64,
        /// Flag value to restore.
        previous: bool,
        /// Message for the toast.
        message: String,
    },

    /// Flip a user between owner and regular user, optimistically.
    ToggleOwner {
        /// Target user.
        user_id: u64,
    },

    /// The owner change was accepted.
    ///
    /// This is an **event** produced by the effect executor.
    OwnerToggled {
        /// Target user.
        user_id: u64,
        /// Whether the user is now an owner.
        made_owner: bool,
    },

    /// The owner change was rejected; the row is reverted.
    ///
    /// This is an **event** produced by the effect executor.
    OwnerToggleFailed {
        /// Target user.
        user_id: u64,
        /// Role to restore.
        previous: Role,
        /// Message for the toast.
        message: String,
    },

    /// Replace a user's role outright. Applied on success, not
    /// optimistically.
    UpdateRole {
        /// Target user.
        user_id: u64,
        /// Role to assign.
        role: Role,
    },

    /// The role change was accepted.
    ///
    /// This is an **event** produced by the effect executor.
    RoleUpdated {
        /// Target user.
        user_id: u64,
        /// The assigned role.
        role: Role,
    },

    /// The role change was rejected.
    ///
    /// This is an **event** produced by the effect executor.
    RoleUpdateFailed {
        /// Target user.
        user_id: u64,
        /// Message for the toast.
        message: String,
    },

    /// Delete a user, optimistically removing the row.
    DeleteUser {
        /// Target user.
        user_id: u64,
    },

    /// The deletion was accepted; the list reloads to fill the page.
    ///
    /// This is an **event** produced by the effect executor.
    UserDeleted {
        /// Deleted user.
        user_id: u64,
    },

    /// The deletion was rejected; the row returns to its old position.
    ///
    /// This is an **event** produced by the effect executor.
    UserDeleteFailed {
        /// Target user.
        user_id: u64,
        /// The removed row.
        row: AdminUserRow,
        /// Where the row sat before removal.
        index: usize,
        /// Message for the toast.
        message: String,
    },

    // ─── Reservation mutations ───
    /// Cancel a reservation, optimistically removing the row.
    CancelReservation {
        /// Target reservation.
        reservation_id: u64,
    },

    /// The cancellation was accepted; the list reloads to fill the page.
    ///
    /// This is an **event** produced by the effect executor.
    ReservationCancelled {
        /// Cancelled reservation.
        reservation_id: u64,
    },

    /// The cancellation was rejected; the row returns to its old position.
    ///
    /// This is an **event** produced by the effect executor.
    ReservationCancelFailed {
        /// Target reservation.
        reservation_id: u64,
        /// The removed row.
        row: AdminReservationRow,
        /// Where the row sat before removal.
        index: usize,
        /// Message for the toast.
        message: String,
    },

    /// Revoke a parking outright.
    RevokeParking {
        /// Target parking.
        parking_id: u64,
    },

    /// The revocation was accepted; the reservations list reloads.
    ///
    /// This is an **event** produced by the effect executor.
    ParkingRevoked {
        /// Revoked parking.
        parking_id: u64,
    },

    /// The revocation was rejected.
    ///
    /// This is an **event** produced by the effect executor.
    ParkingRevokeFailed {
        /// Target parking.
        parking_id: u64,
        /// Message for the toast.
        message: String,
    },

    // ─── Toasts ───
    /// A toast's display time ran out, or the user closed it.
    DismissToast {
        /// The toast to remove.
        id: u64,
    },
}
