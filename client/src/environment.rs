//! Environments: the dependencies reducers draw effects from.
//!
//! Each screen's reducer gets exactly the providers it needs, as generic
//! parameters. Production wires in the HTTP client and the system clock;
//! tests wire in mocks. Environments are cheap to clone, so effects clone
//! a provider out and move it into the async block.

use crate::session::SessionHolder;
use crate::storage::KeyValueStore;
use parkdeck_api::{AdminApi, AuthApi, OwnerApi, ParkingApi, ReservationsApi};
use parkdeck_core::environment::Clock;

/// Dependencies of the authentication reducer.
#[derive(Clone)]
pub struct AuthEnvironment<A, K>
where
    A: AuthApi + Clone,
    K: KeyValueStore + Clone,
{
    /// Backend login and registration endpoints.
    pub api: A,

    /// Shared session holder. Successful logins are persisted through it;
    /// logout wipes it.
    pub sessions: SessionHolder<K>,
}

impl<A, K> AuthEnvironment<A, K>
where
    A: AuthApi + Clone,
    K: KeyValueStore + Clone,
{
    /// Create an authentication environment.
    pub const fn new(api: A, sessions: SessionHolder<K>) -> Self {
        Self { api, sessions }
    }
}

/// Dependencies of the booking reducer.
#[derive(Clone)]
pub struct BookingEnvironment<P, R>
where
    P: ParkingApi + Clone,
    R: ReservationsApi + Clone,
{
    /// Availability endpoint.
    pub parking: P,

    /// Reservation endpoints.
    pub reservations: R,

    /// Render canned data when the availability load fails.
    pub demo_fallback: bool,
}

impl<P, R> BookingEnvironment<P, R>
where
    P: ParkingApi + Clone,
    R: ReservationsApi + Clone,
{
    /// Create a booking environment.
    pub const fn new(parking: P, reservations: R, demo_fallback: bool) -> Self {
        Self {
            parking,
            reservations,
            demo_fallback,
        }
    }
}

/// Dependencies of the owner reducer.
#[derive(Clone)]
pub struct OwnerEnvironment<O, C>
where
    O: OwnerApi + Clone,
    C: Clock + Clone,
{
    /// Owner cancellation endpoint.
    pub owner: O,

    /// Wall-clock source for the 17:00 cutoff.
    pub clock: C,
}

impl<O, C> OwnerEnvironment<O, C>
where
    O: OwnerApi + Clone,
    C: Clock + Clone,
{
    /// Create an owner environment.
    pub const fn new(owner: O, clock: C) -> Self {
        Self { owner, clock }
    }
}

/// Dependencies of the admin reducer.
#[derive(Clone)]
pub struct AdminEnvironment<A>
where
    A: AdminApi + Clone,
{
    /// Admin list and mutation endpoints.
    pub admin: A,

    /// Render canned rows when a list load fails or the first page comes
    /// back empty.
    pub demo_fallback: bool,
}

impl<A> AdminEnvironment<A>
where
    A: AdminApi + Clone,
{
    /// Create an admin environment.
    pub const fn new(admin: A, demo_fallback: bool) -> Self {
        Self {
            admin,
            demo_fallback,
        }
    }
}
