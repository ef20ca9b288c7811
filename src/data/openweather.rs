//! OpenWeatherMap API client
//!
//! This module fetches raw weather payloads from OpenWeatherMap and hands
//! them to the normalization layer. Two API shapes are supported: the
//! free-tier pair (current weather plus 3-hour forecast, requested in
//! parallel) and the combined One Call document.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use super::normalize::{build, ProviderPayload};
use super::WeatherData;

/// Base URL for the OpenWeatherMap API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Units requested from the provider; all downstream math assumes metric
const METRIC_UNITS: &str = "metric";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The provider returned a non-success status
    #[error("Weather API error: {0}")]
    Api(String),
}

/// Which provider response shape to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiShape {
    /// Current weather + 3-hour forecast, combined client-side (free tier)
    #[default]
    Split,
    /// Single combined current/hourly/daily response (One Call 3.0)
    OneCall,
}

/// Client for fetching weather data from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    shape: ApiShape,
}

impl WeatherClient {
    /// Creates a new WeatherClient for the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
            shape: ApiShape::default(),
        }
    }

    /// Creates a new WeatherClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
            shape: ApiShape::default(),
        }
    }

    /// Selects the API shape to request
    pub fn with_shape(mut self, shape: ApiShape) -> Self {
        self.shape = shape;
        self
    }

    /// Overrides the base URL (for testing against a local server)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches and normalizes weather for the given coordinates
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(WeatherData)` - The normalized view model
    /// * `Err(WeatherError)` - If a request or parse fails
    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<WeatherData, WeatherError> {
        let payload = match self.shape {
            ApiShape::Split => {
                // The two free-tier requests are independent; issue them in
                // parallel and fail the pair on the first error.
                let (current, forecast) = futures::future::try_join(
                    self.fetch_current(lat, lon),
                    self.fetch_forecast(lat, lon),
                )
                .await?;
                ProviderPayload::Split { current, forecast }
            }
            ApiShape::OneCall => {
                ProviderPayload::OneCall(Box::new(self.fetch_one_call(lat, lon).await?))
            }
        };

        Ok(build(payload))
    }

    /// Fetches the current weather endpoint (split shape)
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<CurrentResponse, WeatherError> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&units={}&appid={}",
            self.base_url, lat, lon, METRIC_UNITS, self.api_key
        );
        self.get_json(&url).await
    }

    /// Fetches the 5-day/3-hour forecast endpoint (split shape)
    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&units={}&appid={}",
            self.base_url, lat, lon, METRIC_UNITS, self.api_key
        );
        self.get_json(&url).await
    }

    /// Fetches the One Call endpoint
    async fn fetch_one_call(&self, lat: f64, lon: f64) -> Result<OneCallResponse, WeatherError> {
        let url = format!(
            "{}/data/3.0/onecall?lat={}&lon={}&units={}&exclude=minutely&appid={}",
            self.base_url, lat, lon, METRIC_UNITS, self.api_key
        );
        self.get_json(&url).await
    }

    /// Issues a GET request and decodes the JSON body
    ///
    /// Non-success statuses surface the provider's `message` field when the
    /// error body carries one, falling back to the bare status code.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .map(|body| body.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(WeatherError::Api(message));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Error body shape returned by the provider on failures
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ============================================================================
// Split shape: current weather response
// ============================================================================

/// One weather descriptor (condition group + free text)
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// Coarse condition group, e.g. "Clear", "Rain"
    pub main: String,
    /// Free-text description, e.g. "light rain"
    pub description: String,
}

/// Current weather response from `/data/2.5/weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub main: MainReading,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    pub wind: WindReading,
    /// Visibility in meters; the provider omits it in some conditions
    pub visibility: Option<u32>,
    pub clouds: Option<CloudCover>,
    pub sys: SunTimes,
}

/// Main reading block with temperatures and pressure
#[derive(Debug, Clone, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
}

/// Wind block; speed is m/s under metric units
#[derive(Debug, Clone, Deserialize)]
pub struct WindReading {
    pub speed: f64,
}

/// Cloud cover block
#[derive(Debug, Clone, Deserialize)]
pub struct CloudCover {
    /// Cloudiness percentage
    pub all: u32,
}

/// Sunrise/sunset Unix timestamps
#[derive(Debug, Clone, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

// ============================================================================
// Split shape: 3-hour forecast response
// ============================================================================

/// Forecast response from `/data/2.5/forecast` (40 entries, 3-hour steps)
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
    pub city: Option<CityInfo>,
}

/// One 3-hour forecast step
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastReading,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    /// Probability of precipitation, a fraction in [0, 1]
    pub pop: Option<f64>,
    pub wind: WindReading,
}

/// Temperature block of a forecast step
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReading {
    pub temp: f64,
}

/// City metadata attached to the forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    /// UTC offset of the location in seconds
    pub timezone: i32,
}

// ============================================================================
// One Call shape
// ============================================================================

/// Combined response from `/data/3.0/onecall`
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallResponse {
    /// UTC offset of the location in seconds
    pub timezone_offset: i32,
    pub current: OneCallCurrent,
    #[serde(default)]
    pub hourly: Vec<OneCallHourly>,
    #[serde(default)]
    pub daily: Vec<OneCallDaily>,
    pub alerts: Option<Vec<OneCallAlert>>,
}

/// Current block of the One Call response
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallCurrent {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: u32,
    pub humidity: u32,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: u32,
    pub visibility: Option<u32>,
    pub wind_speed: f64,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

/// One per-hour forecast block
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallHourly {
    pub dt: i64,
    pub temp: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
}

/// One native daily forecast block
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallDaily {
    pub dt: i64,
    pub temp: TempRange,
    #[serde(default)]
    pub weather: Vec<WeatherEntry>,
    #[serde(default)]
    pub pop: f64,
    pub summary: Option<String>,
}

/// Daily min/max temperature block
#[derive(Debug, Clone, Deserialize)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

/// One severe-weather alert block
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallAlert {
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    pub description: String,
}
