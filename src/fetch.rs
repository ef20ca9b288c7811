//! Background weather fetch orchestration
//!
//! Fetches run as spawned tasks and report back over a tokio channel so the
//! UI loop never blocks on the network. Overlapping fetches are resolved
//! with a sequence token: every issued fetch gets the next token, and the
//! app only applies the completion carrying the latest one, so a slow stale
//! response can never overwrite a newer result. Requests themselves are not
//! cancelled; a superseded task just runs to completion and its message is
//! dropped.

use tokio::sync::mpsc;

use crate::data::{GeocodeClient, LocateClient, LocationMatch, WeatherClient, WeatherData};

/// Result of one fetch attempt
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Location resolved and weather normalized
    Loaded {
        location: LocationMatch,
        weather: WeatherData,
    },
    /// Something failed; the message is ready for inline display
    Failed { message: String },
}

/// Message delivered back to the app when a fetch finishes
#[derive(Debug, Clone)]
pub struct FetchMessage {
    /// Sequence token of the fetch that produced this message
    pub seq: u64,
    /// What happened
    pub outcome: FetchOutcome,
}

/// The clients a fetch needs, bundled for cheap cloning into tasks
#[derive(Debug, Clone)]
pub struct Clients {
    pub weather: WeatherClient,
    pub geocode: GeocodeClient,
    pub locate: LocateClient,
}

/// What to fetch weather for
#[derive(Debug, Clone)]
pub enum FetchTarget {
    /// Free-text city query, resolved via direct geocoding
    City(String),
    /// Bare coordinates, named via reverse geocoding
    Coordinates { lat: f64, lon: f64 },
    /// Already-resolved location (refresh, favorite selection)
    Location(LocationMatch),
    /// Resolve the machine's own position first
    Geolocate,
}

/// Spawns a fetch task that reports back over `tx` with the given token
pub fn spawn_fetch(
    clients: Clients,
    tx: mpsc::Sender<FetchMessage>,
    seq: u64,
    target: FetchTarget,
) {
    tokio::spawn(async move {
        let outcome = match run_fetch(&clients, target).await {
            Ok((location, weather)) => FetchOutcome::Loaded { location, weather },
            Err(message) => FetchOutcome::Failed { message },
        };
        // The receiver may be gone if the app is shutting down
        let _ = tx.send(FetchMessage { seq, outcome }).await;
    });
}

/// Resolves the target to a location, then fetches and normalizes weather
///
/// Errors collapse to their display strings here; the app shows them inline
/// and never retries automatically.
async fn run_fetch(
    clients: &Clients,
    target: FetchTarget,
) -> Result<(LocationMatch, WeatherData), String> {
    let location = match target {
        FetchTarget::City(query) => clients
            .geocode
            .resolve(&query)
            .await
            .map_err(|e| e.to_string())?,
        FetchTarget::Coordinates { lat, lon } => clients
            .geocode
            .reverse(lat, lon)
            .await
            .map_err(|e| e.to_string())?,
        FetchTarget::Location(location) => location,
        FetchTarget::Geolocate => {
            let coords = clients.locate.locate().await.map_err(|e| e.to_string())?;
            clients
                .geocode
                .reverse(coords.lat, coords.lon)
                .await
                .map_err(|e| e.to_string())?
        }
    };

    let weather = clients
        .weather
        .fetch_weather(location.lat, location.lon)
        .await
        .map_err(|e| e.to_string())?;

    Ok((location, weather))
}
