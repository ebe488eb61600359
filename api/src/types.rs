//! Wire types for the Parkdeck REST API.
//!
//! All payloads use camelCase field names on the wire. Dates travel as
//! `YYYY-MM-DD` strings; reservation dates coming back from the backend are
//! kept as raw strings because some deployments append a time component,
//! and normalization happens client-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Roles and Sessions
// ═══════════════════════════════════════════════════════════════════════

/// Account role.
///
/// Owners manage spot availability, admins manage users and reservations,
/// everyone else books spots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular user who books parking spots.
    #[default]
    User,
    /// Parking lot owner.
    Owner,
    /// Administrator.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "USER"),
            Self::Owner => write!(f, "OWNER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Authenticated session returned by login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// Token scheme, almost always `Bearer`.
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,

    /// User ID.
    pub user_id: u64,

    /// User's email.
    pub email: String,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// Account role. Payloads that omit it describe a regular user.
    #[serde(default)]
    pub role: Role,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Session {
    /// Value for the `Authorization` header, `<type> <token>`.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }

    /// Whether this session belongs to a lot owner.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    /// Whether this session belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,

    /// Account password, at least 8 characters.
    pub password: String,

    /// First name, at most 50 characters.
    pub first_name: String,

    /// Last name, at most 50 characters.
    pub last_name: String,

    /// Optional phone number, at most 20 characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Parking Spaces and Reservations
// ═══════════════════════════════════════════════════════════════════════

/// Lot zone a spot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
    /// Open-air yard spots.
    Yard,
    /// Covered garage spots.
    Garage,
}

/// Per-spot status relative to the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpotStatus {
    /// Free for the selected date.
    Available,
    /// Reserved by someone else.
    Occupied,
    /// Reserved by the requesting user.
    MyReservation,
    /// Withdrawn by the owner for that date.
    OwnerCancelled,
}

/// A parking space as reported by the availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpace {
    /// Space ID.
    pub id: u64,

    /// Spot number within its zone.
    pub spot_number: u32,

    /// Zone the spot belongs to.
    pub parking_type: Zone,

    /// Status relative to the requesting user for the queried date.
    pub status: SpotStatus,
}

/// Request to reserve a space for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    /// Space to reserve.
    pub parking_space_id: u64,

    /// Date to reserve, `YYYY-MM-DD`.
    pub reservation_date: NaiveDate,
}

/// An existing reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation ID.
    pub id: u64,

    /// Reserved space ID.
    pub parking_space_id: u64,

    /// Reservation date as sent by the backend. May carry a time component;
    /// normalize before comparing against a calendar date.
    pub reservation_date: String,

    /// Spot number, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_number: Option<u32>,

    /// Reservation status, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Owner request to withdraw all spots for a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCancellationRequest {
    /// Date to withdraw, `YYYY-MM-DD`.
    pub cancellation_date: NaiveDate,
}

// ═══════════════════════════════════════════════════════════════════════
// Admin Console
// ═══════════════════════════════════════════════════════════════════════

/// Query for a paginated admin list.
///
/// Pages are zero-indexed. An empty search string means no filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Zero-indexed page.
    pub page: u32,
    /// Rows per page.
    pub size: u32,
    /// Search filter, empty for none.
    pub search: String,
    /// Sort spec as `field,direction`, when set.
    pub sort: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            search: String::new(),
            sort: None,
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows in this page.
    pub items: Vec<T>,
    /// Total rows across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Page with no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Whether this page carries no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Wire shape of list responses.
///
/// Some backend builds wrap rows as `{items, total}`, others return a bare
/// array. Both decode to a [`Page`].
#[derive(Deserialize)]
#[serde(untagged)]
enum PageEnvelope<T> {
    Wrapped {
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let envelope = PageEnvelope::deserialize(deserializer)?;
        Ok(match envelope {
            PageEnvelope::Wrapped { items, total } => {
                let total = total.unwrap_or(items.len() as u64);
                Self { items, total }
            }
            PageEnvelope::Bare(items) => {
                let total = items.len() as u64;
                Self { items, total }
            }
        })
    }
}

/// User row in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    /// User ID.
    pub id: u64,

    /// User's email.
    pub email: String,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// Whether the user holds admin rights.
    pub is_admin: bool,

    /// Whether the user is a lot owner or a regular user.
    pub parking_type: Role,
}

/// Reservation row in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservationRow {
    /// Reservation ID.
    pub id: u64,

    /// Email of the reserving user.
    pub user_email: String,

    /// Spot number.
    pub spot: u32,

    /// First reserved date, `YYYY-MM-DD`.
    pub start: String,

    /// Last reserved date, `YYYY-MM-DD`.
    pub end: String,
}

/// Payload for granting or revoking admin rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminRequest {
    /// Target admin flag.
    pub is_admin: bool,
}

/// Payload for granting or revoking the owner role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOwnerRequest {
    /// Target owner flag.
    pub make_owner: bool,
}

/// Payload for replacing a user's role outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// Role to assign.
    pub role: Role,
}
