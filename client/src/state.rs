//! View state for every screen of the client.
//!
//! State is plain data. Reducers are the only writers; the UI reads it and
//! renders. Each screen gets its own state type so stores can be composed
//! per feature.

use crate::dates;
use crate::notify::Toasts;
use crate::validate::FieldErrors;
use chrono::NaiveDate;
use parkdeck_api::{
    AdminReservationRow, AdminUserRow, ListQuery, ParkingSpace, Reservation, Session, Zone,
};

// ═══════════════════════════════════════════════════════════════════════
// Authentication
// ═══════════════════════════════════════════════════════════════════════

/// Login form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Optional phone number, empty when not given.
    pub phone_number: String,
}

/// Authentication screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Current session, `None` when logged out.
    pub session: Option<Session>,

    /// Login form contents.
    pub login: LoginForm,

    /// Registration form contents.
    pub register: RegisterForm,

    /// Validation messages from the last submit attempt.
    pub field_errors: FieldErrors,

    /// A login or registration request is in flight.
    pub submitting: bool,

    /// Top-of-form error from the last failed submit.
    pub error: Option<String>,
}

impl AuthState {
    /// State for an already-authenticated user, e.g. a restored session.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
            ..Self::default()
        }
    }

    /// Whether a session exists.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Booking
// ═══════════════════════════════════════════════════════════════════════

/// The modal currently covering the booking grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingDialog {
    /// No dialog.
    #[default]
    None,

    /// Asking the user to confirm a booking.
    ConfirmBooking {
        /// The space about to be booked.
        space: ParkingSpace,
        /// Error from a failed booking attempt; the dialog stays open so
        /// the user can retry or give up.
        error: Option<String>,
    },

    /// Asking the user to confirm cancelling their own reservation.
    ConfirmCancel {
        /// The space whose reservation is about to be cancelled.
        space: ParkingSpace,
    },
}

impl BookingDialog {
    /// Whether any dialog is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Booking screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingState {
    /// The date the grid is showing.
    pub selected_date: NaiveDate,

    /// Yard spots, ordered by spot number.
    pub yard_spaces: Vec<ParkingSpace>,

    /// Garage spots, ordered by spot number.
    pub garage_spaces: Vec<ParkingSpace>,

    /// The user's reservations, across all dates.
    pub my_reservations: Vec<Reservation>,

    /// The modal currently showing.
    pub dialog: BookingDialog,

    /// Availability is being fetched.
    pub loading: bool,

    /// A booking request is in flight.
    pub booking: bool,

    /// A cancellation request is in flight.
    pub cancelling: bool,

    /// Last load or cancellation failure.
    pub error: Option<String>,

    /// Last success message.
    pub notice: Option<String>,

    /// The grid shows canned demo data rather than backend data.
    pub demo_data: bool,
}

impl BookingState {
    /// Fresh state pointed at `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            selected_date: date,
            ..Self::default()
        }
    }

    /// Replace the grid, splitting spaces into zone buckets ordered by
    /// spot number.
    pub fn set_spaces(&mut self, spaces: Vec<ParkingSpace>) {
        let (yard, garage): (Vec<_>, Vec<_>) = spaces
            .into_iter()
            .partition(|space| space.parking_type == Zone::Yard);
        self.yard_spaces = yard;
        self.garage_spaces = garage;
        self.yard_spaces.sort_by_key(|space| space.spot_number);
        self.garage_spaces.sort_by_key(|space| space.spot_number);
    }

    /// Look up a space in either zone.
    #[must_use]
    pub fn space(&self, space_id: u64) -> Option<&ParkingSpace> {
        self.yard_spaces
            .iter()
            .chain(self.garage_spaces.iter())
            .find(|space| space.id == space_id)
    }

    /// The user's reservation of `space_id` on `day`, if one exists.
    ///
    /// Backend reservation dates may carry a time component; they are
    /// normalized before comparing.
    #[must_use]
    pub fn reservation_for(&self, space_id: u64, day: NaiveDate) -> Option<&Reservation> {
        self.my_reservations
            .iter()
            .find(|r| r.parking_space_id == space_id && dates::matches_day(&r.reservation_date, day))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Owner
// ═══════════════════════════════════════════════════════════════════════

/// Where the owner screen is in its flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnerPhase {
    /// Picking a date to withdraw.
    #[default]
    SelectingDate,

    /// Confirmation popup is showing.
    Confirming,
}

/// Result banner after a cancellation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerOutcome {
    /// Whether the cancellation went through.
    pub success: bool,
    /// Text shown in the banner.
    pub text: String,
}

/// Owner screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerState {
    /// Current step of the flow.
    pub phase: OwnerPhase,

    /// Earliest date the owner may withdraw. Depends on the 17:00 cutoff.
    pub min_date: NaiveDate,

    /// The date picked for withdrawal. Never before `min_date`.
    pub selected_date: NaiveDate,

    /// A cancellation request is in flight.
    pub submitting: bool,

    /// Outcome banner from the last attempt.
    pub outcome: Option<OwnerOutcome>,
}

// ═══════════════════════════════════════════════════════════════════════
// Admin
// ═══════════════════════════════════════════════════════════════════════

/// Paging, search, and sort controls of one admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListControls {
    /// Zero-indexed page.
    pub page: u32,

    /// Rows per page.
    pub size: u32,

    /// What the user has typed into the search box.
    pub search_input: String,

    /// The search text the current rows were loaded with. Trails
    /// `search_input` by the debounce interval.
    pub applied_search: String,

    /// Sort spec as `field,direction`, when set.
    pub sort: Option<String>,
}

impl Default for ListControls {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            search_input: String::new(),
            applied_search: String::new(),
            sort: None,
        }
    }
}

impl ListControls {
    /// The query these controls describe. Uses the applied search, not
    /// whatever is mid-keystroke in the box.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
            search: self.applied_search.clone(),
            sort: self.sort.clone(),
        }
    }
}

/// One paginated admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    /// Rows of the current page.
    pub rows: Vec<T>,

    /// Total rows across all pages.
    pub total: u64,

    /// Paging, search, and sort controls.
    pub controls: ListControls,

    /// A load is in flight.
    pub loading: bool,

    /// Last load failure.
    pub error: Option<String>,

    /// The rows are canned demo data rather than backend data.
    pub demo_data: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            controls: ListControls::default(),
            loading: false,
            error: None,
            demo_data: false,
        }
    }
}

/// Admin console state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminState {
    /// Users list.
    pub users: ListState<AdminUserRow>,

    /// Reservations list.
    pub reservations: ListState<AdminReservationRow>,

    /// Live toasts.
    pub toasts: Toasts,

    /// User row with a mutation in flight. A second mutation on the same
    /// row is ignored until the first resolves.
    pub busy_user_id: Option<u64>,

    /// Reservation row with a cancellation in flight.
    pub busy_reservation_id: Option<u64>,

    /// Parking id with a revocation in flight.
    pub revoking_parking_id: Option<u64>,
}
