//! Canned demo data.
//!
//! When the backend is unreachable and demo fallback is enabled, the
//! client renders a plausible lot and a small admin dataset instead of a
//! blank screen. Demo state is always flagged as such so the UI can label
//! it.

use parkdeck_api::{AdminReservationRow, AdminUserRow, ParkingSpace, Role, SpotStatus, Zone};
use rand::Rng;

const YARD_SPOTS: u32 = 50;
const GARAGE_SPOTS: u32 = 100;

/// A full demo lot: 50 yard spots then 100 garage spots, ids sequential
/// across both zones.
#[must_use]
pub fn demo_spaces() -> Vec<ParkingSpace> {
    demo_spaces_with(&mut rand::thread_rng())
}

/// Demo lot from a caller-supplied generator, for reproducible tests.
pub fn demo_spaces_with<R: Rng>(rng: &mut R) -> Vec<ParkingSpace> {
    let mut spaces = Vec::with_capacity((YARD_SPOTS + GARAGE_SPOTS) as usize);

    for spot in 1..=YARD_SPOTS {
        spaces.push(ParkingSpace {
            id: u64::from(spot),
            spot_number: spot,
            parking_type: Zone::Yard,
            status: roll_status(rng),
        });
    }
    for spot in 1..=GARAGE_SPOTS {
        spaces.push(ParkingSpace {
            id: u64::from(YARD_SPOTS + spot),
            spot_number: spot,
            parking_type: Zone::Garage,
            status: roll_status(rng),
        });
    }

    spaces
}

// Roughly 90% free, 8% taken, 2% already yours.
fn roll_status<R: Rng>(rng: &mut R) -> SpotStatus {
    let roll: f64 = rng.gen_range(0.0..1.0);
    if roll < 0.90 {
        SpotStatus::Available
    } else if roll < 0.98 {
        SpotStatus::Occupied
    } else {
        SpotStatus::MyReservation
    }
}

/// Demo user rows for the admin console.
#[must_use]
pub fn demo_admin_users() -> Vec<AdminUserRow> {
    vec![
        AdminUserRow {
            id: 1,
            email: "owner1@example.com".to_string(),
            first_name: "Owner".to_string(),
            last_name: "One".to_string(),
            is_admin: false,
            parking_type: Role::Owner,
        },
        AdminUserRow {
            id: 2,
            email: "user2@example.com".to_string(),
            first_name: "User".to_string(),
            last_name: "Two".to_string(),
            is_admin: false,
            parking_type: Role::User,
        },
        AdminUserRow {
            id: 3,
            email: "admin@example.com".to_string(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            is_admin: true,
            parking_type: Role::User,
        },
    ]
}

/// Demo reservation rows for the admin console.
#[must_use]
pub fn demo_admin_reservations() -> Vec<AdminReservationRow> {
    vec![
        AdminReservationRow {
            id: 101,
            user_email: "user2@example.com".to_string(),
            spot: 12,
            start: "2025-12-20".to_string(),
            end: "2025-12-20".to_string(),
        },
        AdminReservationRow {
            id: 102,
            user_email: "owner1@example.com".to_string(),
            spot: 5,
            start: "2025-12-22".to_string(),
            end: "2025-12-22".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_demo_lot_has_both_zones_with_sequential_ids() {
        let spaces = demo_spaces_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(spaces.len(), 150);

        let yard: Vec<_> = spaces
            .iter()
            .filter(|s| s.parking_type == Zone::Yard)
            .collect();
        let garage: Vec<_> = spaces
            .iter()
            .filter(|s| s.parking_type == Zone::Garage)
            .collect();
        assert_eq!(yard.len(), 50);
        assert_eq!(garage.len(), 100);

        assert_eq!(spaces[0].id, 1);
        assert_eq!(spaces[49].id, 50);
        assert_eq!(spaces[50].id, 51);
        assert_eq!(spaces[50].spot_number, 1);
        assert_eq!(spaces[149].id, 150);
    }

    #[test]
    fn test_demo_lot_is_mostly_available() {
        let spaces = demo_spaces_with(&mut StdRng::seed_from_u64(7));
        let available = spaces
            .iter()
            .filter(|s| s.status == SpotStatus::Available)
            .count();
        assert!(available > 100, "only {available} of 150 spots available");
    }

    #[test]
    fn test_demo_admin_rows_are_stable() {
        let users = demo_admin_users();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].email, "owner1@example.com");
        assert_eq!(users[0].parking_type, Role::Owner);
        assert!(users[2].is_admin);

        let reservations = demo_admin_reservations();
        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[0].id, 101);
        assert_eq!(reservations[0].spot, 12);
    }
}
