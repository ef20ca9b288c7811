//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! optional startup city, unit selection, API shape, and API key resolution.

use clap::Parser;
use std::env;
use thiserror::Error;

use crate::data::ApiShape;
use crate::prefs::TemperatureUnit;

/// Environment variable consulted when --api-key is not given
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified unit name is not recognized
    #[error("Invalid unit: '{0}'. Valid units: celsius, c, fahrenheit, f")]
    InvalidUnit(String),

    /// No API key was provided by flag or environment
    #[error("Missing API key: pass --api-key or set OPENWEATHER_API_KEY")]
    MissingApiKey,
}

/// Skycast - Terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Terminal weather dashboard with search, favorites, and forecasts")]
#[command(version)]
pub struct Cli {
    /// City (or "lat,lon" pair) to load at startup
    ///
    /// Examples:
    ///   skycast                  # Open the search view
    ///   skycast "Vancouver"      # Load Vancouver immediately
    ///   skycast 49.28,-123.12    # Load by coordinates
    ///   skycast --units f Tokyo  # Load Tokyo, display Fahrenheit
    pub city: Option<String>,

    /// Temperature unit to display (celsius, c, fahrenheit, f)
    #[arg(long, value_name = "UNIT")]
    pub units: Option<String>,

    /// Use the One Call API instead of the free current+forecast pair
    #[arg(long)]
    pub one_call: bool,

    /// OpenWeatherMap API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// City to fetch immediately after startup, if any
    pub initial_city: Option<String>,
    /// Unit override applied on top of the stored preference
    pub initial_unit: Option<TemperatureUnit>,
    /// Provider API shape to request
    pub shape: ApiShape,
    /// OpenWeatherMap API key
    pub api_key: String,
}

/// Parses a unit string argument into a TemperatureUnit.
///
/// # Arguments
/// * `s` - The unit string from CLI
///
/// # Returns
/// * `Ok(TemperatureUnit)` if the string matches a valid unit
/// * `Err(CliError::InvalidUnit)` if the string doesn't match
pub fn parse_unit_arg(s: &str) -> Result<TemperatureUnit, CliError> {
    match s.to_ascii_lowercase().as_str() {
        "celsius" | "c" | "metric" => Ok(TemperatureUnit::Celsius),
        "fahrenheit" | "f" | "imperial" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(CliError::InvalidUnit(s.to_string())),
    }
}

/// Parses a "lat,lon" pair, the direct-coordinates entry form
///
/// Queries that look like coordinates skip the city search and go straight
/// to a reverse-geocoded coordinate fetch. Out-of-range values are treated
/// as ordinary text rather than rejected.
pub fn parse_coords(s: &str) -> Option<(f64, f64)> {
    let (lat, lon) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some((lat, lon))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// The unit argument is validated before the API key is resolved so that
    /// a bad unit is reported as such regardless of key configuration.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_unit = match &cli.units {
            Some(unit) => Some(parse_unit_arg(unit)?),
            None => None,
        };

        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?;

        Ok(StartupConfig {
            initial_city: cli.city.clone(),
            initial_unit,
            shape: if cli.one_call {
                ApiShape::OneCall
            } else {
                ApiShape::Split
            },
            api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_parse_unit_arg_celsius_aliases() {
        assert_eq!(parse_unit_arg("celsius").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(parse_unit_arg("c").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(parse_unit_arg("metric").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(parse_unit_arg("Celsius").unwrap(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_parse_unit_arg_fahrenheit_aliases() {
        assert_eq!(
            parse_unit_arg("fahrenheit").unwrap(),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!(parse_unit_arg("f").unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(
            parse_unit_arg("imperial").unwrap(),
            TemperatureUnit::Fahrenheit
        );
    }

    #[test]
    fn test_parse_unit_arg_invalid() {
        let result = parse_unit_arg("kelvin");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid unit"));
        assert!(err.to_string().contains("kelvin"));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = cli(&["skycast"]);
        assert!(cli.city.is_none());
        assert!(cli.units.is_none());
        assert!(!cli.one_call);
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn test_cli_parse_city_positional() {
        let cli = cli(&["skycast", "Vancouver"]);
        assert_eq!(cli.city.as_deref(), Some("Vancouver"));
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = cli(&[
            "skycast", "--units", "f", "--one-call", "--api-key", "abc123", "Tokyo",
        ]);
        assert_eq!(cli.city.as_deref(), Some("Tokyo"));
        assert_eq!(cli.units.as_deref(), Some("f"));
        assert!(cli.one_call);
        assert_eq!(cli.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_startup_config_defaults() {
        let config = StartupConfig::default();
        assert!(config.initial_city.is_none());
        assert!(config.initial_unit.is_none());
        assert_eq!(config.shape, ApiShape::Split);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_startup_config_from_cli_with_key_flag() {
        let cli = cli(&["skycast", "--api-key", "abc123"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.shape, ApiShape::Split);
        assert!(config.initial_unit.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_one_call_shape() {
        let cli = cli(&["skycast", "--one-call", "--api-key", "abc123"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.shape, ApiShape::OneCall);
    }

    #[test]
    fn test_startup_config_from_cli_unit_override() {
        let cli = cli(&["skycast", "--units", "fahrenheit", "--api-key", "abc123"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_unit, Some(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn test_startup_config_invalid_unit_reported_before_key() {
        // No API key given either; the unit error must win
        let cli = cli(&["skycast", "--units", "kelvin"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::InvalidUnit(_))));
    }

    #[test]
    fn test_parse_coords_valid_pair() {
        assert_eq!(parse_coords("49.28,-123.12"), Some((49.28, -123.12)));
        assert_eq!(parse_coords(" 49.28 , -123.12 "), Some((49.28, -123.12)));
        assert_eq!(parse_coords("0,0"), Some((0.0, 0.0)));
    }

    #[test]
    fn test_parse_coords_rejects_city_names() {
        assert_eq!(parse_coords("Vancouver"), None);
        assert_eq!(parse_coords("Washington, DC"), None);
    }

    #[test]
    fn test_parse_coords_rejects_out_of_range() {
        assert_eq!(parse_coords("91.0,10.0"), None);
        assert_eq!(parse_coords("45.0,200.0"), None);
    }

    #[test]
    fn test_startup_config_empty_key_flag_is_missing() {
        let previous = env::var(API_KEY_ENV).ok();
        env::remove_var(API_KEY_ENV);

        let cli = cli(&["skycast", "--api-key", ""]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::MissingApiKey)));

        if let Some(value) = previous {
            env::set_var(API_KEY_ENV, value);
        }
    }
}
