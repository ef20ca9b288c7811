//! Location resolver backed by the OpenWeatherMap geocoding API
//!
//! Resolves free-text city queries to coordinates (direct geocoding) and
//! coordinates back to place names (reverse geocoding).

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::LocationMatch;

/// Base URL for the OpenWeatherMap geocoding API
const GEOCODE_BASE_URL: &str = "https://api.openweathermap.org";

/// Display name used when reverse geocoding finds nothing at the coordinates
const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Errors that can occur when resolving locations
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The geocoding API returned a non-success status
    #[error("Geocoding API error: HTTP {0}")]
    Api(u16),

    /// No location matched the query
    #[error("Location \"{0}\" not found")]
    NotFound(String),
}

/// Raw geocoding API entry
#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    country: String,
    state: Option<String>,
    lat: f64,
    lon: f64,
}

impl From<GeoEntry> for LocationMatch {
    fn from(entry: GeoEntry) -> Self {
        let display_name = display_name(&entry.name, entry.state.as_deref(), &entry.country);
        LocationMatch {
            name: entry.name,
            country: entry.country,
            state: entry.state,
            lat: entry.lat,
            lon: entry.lon,
            display_name,
        }
    }
}

/// Client for the geocoding endpoints
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    /// Creates a new GeocodeClient for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEOCODE_BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL (for testing against a local server)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Searches locations matching a free-text city query
    ///
    /// A blank query short-circuits to an empty result without touching the
    /// network. Returns up to `limit` matches in provider ranking order.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LocationMatch>, GeocodeError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/geo/1.0/direct", self.base_url);
        // The query builder handles URL encoding of city names with spaces
        // or non-ASCII characters.
        let entries: Vec<GeoEntry> = self
            .get_json(
                &url,
                &[
                    ("q", query),
                    ("limit", &limit.to_string()),
                    ("appid", &self.api_key),
                ],
            )
            .await?;

        Ok(entries.into_iter().map(LocationMatch::from).collect())
    }

    /// Resolves a query to its single best match
    ///
    /// # Returns
    /// * `Ok(LocationMatch)` - The top-ranked match
    /// * `Err(GeocodeError::NotFound)` - If nothing matched
    pub async fn resolve(&self, query: &str) -> Result<LocationMatch, GeocodeError> {
        self.search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }

    /// Reverse geocodes coordinates to a place name
    ///
    /// An empty result is not an error: the original behavior is to fall
    /// back to an "Unknown Location" placeholder at the given coordinates.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<LocationMatch, GeocodeError> {
        let url = format!("{}/geo/1.0/reverse", self.base_url);
        let entries: Vec<GeoEntry> = self
            .get_json(
                &url,
                &[
                    ("lat", &lat.to_string() as &str),
                    ("lon", &lon.to_string()),
                    ("limit", "1"),
                    ("appid", &self.api_key),
                ],
            )
            .await?;

        Ok(entries
            .into_iter()
            .next()
            .map(|entry| {
                let mut location = LocationMatch::from(entry);
                location.lat = lat;
                location.lon = lon;
                location
            })
            .unwrap_or_else(|| unknown_location(lat, lon)))
    }

    /// Issues a GET request with query parameters and decodes the JSON body
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, GeocodeError> {
        let response = self.client.get(url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GeocodeError::Api(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Composes the display name from its parts
///
/// "name, state, country" when a non-empty state is present, otherwise
/// "name, country".
fn display_name(name: &str, state: Option<&str>, country: &str) -> String {
    match state {
        Some(state) if !state.is_empty() => format!("{}, {}, {}", name, state, country),
        _ => format!("{}, {}", name, country),
    }
}

/// Placeholder location for coordinates no place name maps to
fn unknown_location(lat: f64, lon: f64) -> LocationMatch {
    LocationMatch {
        name: UNKNOWN_LOCATION.to_string(),
        country: String::new(),
        state: None,
        lat,
        lon,
        display_name: UNKNOWN_LOCATION.to_string(),
    }
}
