//! Parkdeck command-line demo.
//!
//! Restores the saved session, loads the availability grid for the next
//! bookable day, and prints a summary per zone. Point `PARKDECK_API_URL`
//! at a running backend, or set `PARKDECK_DEMO_FALLBACK=true` to get
//! generated rows when no backend is reachable.

use chrono::Days;
use parkdeck_api::{ApiClient, SpotStatus};
use parkdeck_client::storage::FileStore;
use parkdeck_client::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, Config, SessionHolder,
};
use parkdeck_core::environment::{Clock, SystemClock};
use parkdeck_runtime::Store;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Parkdeck client");

    // Load configuration
    let config = Config::from_env();
    info!(
        api_url = %config.api_url,
        demo_fallback = config.demo_fallback,
        session_file = %config.session_file.display(),
        "Configuration loaded"
    );

    // Restore the saved session, if any
    let sessions = SessionHolder::new(FileStore::open(&config.session_file)?);
    match sessions.current() {
        Some(session) => info!(email = %session.email, "Session restored"),
        None => info!("No saved session, browsing anonymously"),
    }

    // Build the booking store
    let api = ApiClient::new(&config.api_url, sessions.clone());
    let env = BookingEnvironment::new(api.clone(), api, config.demo_fallback);
    let store = Store::new(BookingState::default(), BookingReducer::new(), env);

    // Tomorrow is the first bookable day
    let date = SystemClock.now_local().date() + Days::new(1);
    println!("=== Parkdeck availability for {date} ===\n");

    let mut handle = store.send(BookingAction::LoadAvailability { date }).await?;
    if handle
        .wait_with_timeout(Duration::from_secs(10))
        .await
        .is_err()
    {
        warn!("Timed out waiting for the availability load");
    }

    let report = store.state(grid_report).await;
    println!("{report}");

    store.shutdown(Duration::from_secs(5)).await?;
    info!("Client stopped");
    Ok(())
}

/// Render the loaded grid as a per-zone summary.
fn grid_report(state: &BookingState) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (label, spaces) in [("Yard", &state.yard_spaces), ("Garage", &state.garage_spaces)] {
        let free = count(spaces, SpotStatus::Available);
        let taken = count(spaces, SpotStatus::Occupied);
        let mine = count(spaces, SpotStatus::MyReservation);
        let withdrawn = count(spaces, SpotStatus::OwnerCancelled);

        let _ = write!(out, "{label:7} {free} free, {taken} taken");
        if mine > 0 {
            let _ = write!(out, ", {mine} yours");
        }
        if withdrawn > 0 {
            let _ = write!(out, ", {withdrawn} withdrawn");
        }
        let _ = writeln!(out, " ({} spots)", spaces.len());
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "\nBackend error: {error}");
    }
    if state.demo_data {
        let _ = writeln!(out, "Showing generated demo rows.");
    }

    out
}

fn count(spaces: &[parkdeck_api::ParkingSpace], status: SpotStatus) -> usize {
    spaces.iter().filter(|s| s.status == status).count()
}
