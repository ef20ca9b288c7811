//! IP-based geolocation
//!
//! Stands in for browser geolocation: resolves the machine's public IP to
//! approximate coordinates via ip-api.com (free, no API key). The failure
//! surface mirrors the browser geolocation error codes so the UI can show
//! the same messages for each.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Geolocation endpoint; `fields` trims the response to what we read
const LOCATE_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Request timeout, matching the 10-second geolocation timeout upstream
const LOCATE_TIMEOUT_SECS: u64 = 10;

/// A resolved coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Errors that can occur when geolocating
#[derive(Debug, Error)]
pub enum LocateError {
    /// The service refused the request (rate limit or blocked)
    #[error("Location permission denied")]
    PermissionDenied,

    /// The service could not produce a position
    #[error("Location information unavailable")]
    Unavailable,

    /// The request timed out
    #[error("Location request timed out")]
    Timeout,

    /// The service answered with something that is not a position document
    #[error("Geolocation is not supported in this environment")]
    Unsupported,
}

/// Response shape of the ip-api.com JSON endpoint
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[allow(dead_code)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Client for IP-based geolocation
#[derive(Debug, Clone)]
pub struct LocateClient {
    client: Client,
    endpoint: String,
}

impl Default for LocateClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LocateClient {
    /// Creates a new LocateClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: LOCATE_URL.to_string(),
        }
    }

    /// Overrides the endpoint (for testing against a local server)
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Resolves the current public IP to coordinates
    pub async fn locate(&self) -> Result<Coordinates, LocateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(LOCATE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LocateError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocateError::Unavailable);
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|_| LocateError::Unsupported)?;

        coordinates_from(body)
    }
}

/// Maps a transport-level failure to the geolocation error surface
fn classify_request_error(err: reqwest::Error) -> LocateError {
    if err.is_timeout() {
        LocateError::Timeout
    } else {
        LocateError::Unavailable
    }
}

/// Extracts coordinates from a parsed service response
fn coordinates_from(body: IpApiResponse) -> Result<Coordinates, LocateError> {
    if body.status != "success" {
        return Err(LocateError::Unavailable);
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
        _ => Err(LocateError::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_success_body() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{ "status": "success", "lat": 49.28, "lon": -123.12 }"#,
        )
        .expect("Failed to parse");

        let coords = coordinates_from(body).expect("Expected coordinates");
        assert!((coords.lat - 49.28).abs() < 0.001);
        assert!((coords.lon - (-123.12)).abs() < 0.001);
    }

    #[test]
    fn test_coordinates_from_failure_status() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{ "status": "fail", "message": "private range", "lat": null, "lon": null }"#,
        )
        .expect("Failed to parse");

        assert!(matches!(
            coordinates_from(body),
            Err(LocateError::Unavailable)
        ));
    }

    #[test]
    fn test_coordinates_from_missing_fields() {
        let body: IpApiResponse =
            serde_json::from_str(r#"{ "status": "success" }"#).expect("Failed to parse");
        assert!(matches!(
            coordinates_from(body),
            Err(LocateError::Unavailable)
        ));
    }

    #[test]
    fn test_error_messages_match_geolocation_surface() {
        assert_eq!(
            LocateError::PermissionDenied.to_string(),
            "Location permission denied"
        );
        assert_eq!(
            LocateError::Unavailable.to_string(),
            "Location information unavailable"
        );
        assert_eq!(LocateError::Timeout.to_string(), "Location request timed out");
    }
}
