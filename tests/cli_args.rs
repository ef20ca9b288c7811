//! Integration tests for CLI argument handling
//!
//! Tests the flags and startup validation paths that exit before the
//! terminal UI starts.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
///
/// The API key environment variable is cleared so tests behave the same on
/// machines that have one configured.
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_skycast"))
        .env_remove("OPENWEATHER_API_KEY")
        .args(args)
        .output()
        .expect("Failed to execute skycast")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("skycast"), "Help should mention skycast");
    assert!(stdout.contains("units"), "Help should mention --units flag");
    assert!(
        stdout.contains("one-call"),
        "Help should mention --one-call flag"
    );
}

#[test]
fn test_invalid_unit_prints_error_and_exits() {
    let output = run_cli(&["--units", "kelvin", "--api-key", "dummy"]);
    assert!(!output.status.success(), "Expected invalid unit to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid unit") && stderr.contains("kelvin"),
        "Should print error message about invalid unit: {}",
        stderr
    );
}

#[test]
fn test_missing_api_key_prints_error_and_exits() {
    let output = run_cli(&["Vancouver"]);
    assert!(!output.status.success(), "Expected missing key to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key"),
        "Should point at the missing API key: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use skycast::cli::{parse_unit_arg, Cli, StartupConfig};
    use skycast::data::ApiShape;
    use skycast::prefs::TemperatureUnit;

    #[test]
    fn test_cli_no_args_has_no_city() {
        let cli = Cli::parse_from(["skycast"]);
        assert!(cli.city.is_none());
    }

    #[test]
    fn test_cli_city_positional() {
        let cli = Cli::parse_from(["skycast", "New York"]);
        assert_eq!(cli.city.as_deref(), Some("New York"));
    }

    #[test]
    fn test_parse_unit_arg_f_returns_fahrenheit() {
        let result = parse_unit_arg("f");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_parse_unit_arg_invalid_returns_error() {
        let result = parse_unit_arg("kelvin");
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_from_cli_full() {
        let cli = Cli::parse_from([
            "skycast", "--api-key", "abc", "--units", "f", "--one-call", "Tokyo",
        ]);
        let config = StartupConfig::from_cli(&cli).expect("Config should build");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.initial_unit, Some(TemperatureUnit::Fahrenheit));
        assert_eq!(config.shape, ApiShape::OneCall);
        assert_eq!(config.initial_city.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_startup_config_from_cli_invalid_unit() {
        let cli = Cli::parse_from(["skycast", "--api-key", "abc", "--units", "kelvin"]);
        let config = StartupConfig::from_cli(&cli);
        assert!(config.is_err());
    }
}
