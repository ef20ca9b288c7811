//! Core data models for Skycast
//!
//! This module contains the normalized weather view model consumed by the UI,
//! together with the clients that resolve locations and fetch provider data.

pub mod geocode;
pub mod locate;
pub mod normalize;
pub mod openweather;

pub use geocode::{GeocodeClient, GeocodeError};
pub use locate::{Coordinates, LocateClient, LocateError};
#[allow(unused_imports)]
pub use normalize::{average_temperature, build, ProviderPayload};
pub use openweather::{ApiShape, WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};

/// Weather condition groups as reported by the provider
///
/// The provider labels each reading with a coarse condition group ("Clear",
/// "Rain", ...). Groups we do not recognize fold into `Clouds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    Clear,
    #[default]
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
}

impl WeatherCondition {
    /// Maps a provider condition group string to a `WeatherCondition`
    pub fn from_group(group: &str) -> Self {
        match group {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" | "Squall" | "Tornado" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Mist" | "Haze" | "Smoke" | "Dust" | "Sand" | "Ash" => Self::Mist,
            "Fog" => Self::Fog,
            _ => Self::Clouds,
        }
    }

    /// Human-readable label for the condition
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
        }
    }
}

/// A resolved location as returned by the location resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    /// Primary place name (e.g. "Vancouver")
    pub name: String,
    /// ISO country code
    pub country: String,
    /// State or province, when the resolver reports one
    pub state: Option<String>,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
    /// Pre-composed display name ("name, state, country" or "name, country")
    pub display_name: String,
}

/// Normalized current conditions
///
/// All temperatures are integer degrees Celsius; wind is km/h; visibility is
/// km. Fields the provider may omit carry their documented defaults instead
/// of an `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature
    pub temp: i32,
    /// Apparent ("feels like") temperature
    pub feels_like: i32,
    /// Condition group
    pub condition: WeatherCondition,
    /// Free-text condition description from the provider
    pub description: String,
    /// Relative humidity percentage
    pub humidity: u32,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Wind speed in km/h
    pub wind_kph: i32,
    /// Visibility in km (10 when the provider omits it)
    pub visibility_km: i32,
    /// UV index (0 when unavailable)
    pub uv_index: i32,
    /// Dew point in Celsius (0 when unavailable)
    pub dew_point: i32,
    /// Cloud cover percentage (0 when unavailable)
    pub clouds: u32,
    /// Sunrise as Unix seconds, passed through unchanged
    pub sunrise: i64,
    /// Sunset as Unix seconds, passed through unchanged
    pub sunset: i64,
}

/// One entry of the hourly forecast strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Unix timestamp of the forecast slot
    pub timestamp: i64,
    /// Wall-clock label at the location, formatted `HH:00`
    pub label: String,
    /// Temperature in integer Celsius
    pub temp: i32,
    /// Condition group
    pub condition: WeatherCondition,
    /// Precipitation probability percentage (0-100)
    pub rain: u8,
    /// Wind speed in km/h
    pub wind_kph: i32,
    /// Whether this is the first (most current) entry
    pub is_current: bool,
}

/// One entry of the daily forecast list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Unix timestamp of the day's first sample
    pub timestamp: i64,
    /// Minimum temperature in integer Celsius
    pub temp_min: i32,
    /// Maximum temperature in integer Celsius
    pub temp_max: i32,
    /// Dominant condition group for the day
    pub condition: WeatherCondition,
    /// Maximum precipitation probability percentage (0-100)
    pub rain: u8,
    /// Free-text day summary, when the provider supplies one
    pub summary: Option<String>,
}

/// A severe-weather alert from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    /// Issuing authority
    pub sender: String,
    /// Alert event name (e.g. "Wind Advisory")
    pub event: String,
    /// Alert start as Unix seconds
    pub start: i64,
    /// Alert end as Unix seconds
    pub end: i64,
    /// Full alert text
    pub description: String,
}

/// The normalized weather view model
///
/// Produced fresh on every fetch and replacing the prior instance wholesale;
/// `hourly[0]` is the soonest slot and `daily[0]` is today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherData {
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly forecast, chronological, capped per API shape
    pub hourly: Vec<HourlyEntry>,
    /// Daily forecast, today first, capped per API shape
    pub daily: Vec<DailyEntry>,
    /// UTC offset of the location in seconds
    pub timezone_offset: i32,
    /// Active alerts (empty when the shape carries none)
    pub alerts: Vec<WeatherAlert>,
}
