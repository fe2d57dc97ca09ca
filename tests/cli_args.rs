//! Integration tests for CLI argument handling
//!
//! Exercises flag parsing and validation through the compiled binary. Every
//! case here fails or exits before any network request is made.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tempcast"))
        .args(args)
        .output()
        .expect("Failed to execute tempcast")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tempcast"), "Help should mention tempcast");
    assert!(stdout.contains("--latitude"), "Help should mention --latitude");
    assert!(stdout.contains("--past-minutely-15"), "Help should mention --past-minutely-15");
    assert!(stdout.contains("--cache-dir"), "Help should mention --cache-dir");
}

#[test]
fn test_invalid_latitude_prints_error_and_exits() {
    let output = run_cli(&["--latitude", "123"]);
    assert!(!output.status.success(), "Expected invalid latitude to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid latitude"),
        "Should print error message about invalid latitude: {}",
        stderr
    );
    assert!(output.stdout.is_empty(), "Nothing should be printed to stdout");
}

#[test]
fn test_invalid_forecast_days_prints_error_and_exits() {
    let output = run_cli(&["--forecast-days", "30"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid forecast days"), "Unexpected stderr: {}", stderr);
}

#[test]
fn test_non_numeric_latitude_is_rejected_by_parser() {
    let output = run_cli(&["--latitude", "north"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "Unexpected stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use tempcast::cli::{Cli, CliError, RunConfig};
    use tempcast::data::ForecastRequest;

    #[test]
    fn test_cli_no_args_uses_defaults() {
        let cli = Cli::parse_from(["tempcast"]);
        let config = RunConfig::from_cli(&cli).unwrap();
        assert_eq!(config.request, ForecastRequest::default());
    }

    #[test]
    fn test_cli_overrides_request_fields() {
        let cli = Cli::parse_from([
            "tempcast",
            "--latitude",
            "48.85",
            "--longitude",
            "2.35",
            "--timezone",
            "Europe/Paris",
            "--past-minutely-15",
            "4",
            "--forecast-days",
            "2",
        ]);
        let config = RunConfig::from_cli(&cli).unwrap();

        assert!((config.request.latitude - 48.85).abs() < 0.0001);
        assert!((config.request.longitude - 2.35).abs() < 0.0001);
        assert_eq!(config.request.timezone, "Europe/Paris");
        assert_eq!(config.request.past_minutely_15, 4);
        assert_eq!(config.request.forecast_days, 2);
    }

    #[test]
    fn test_cli_latitude_bounds_are_inclusive() {
        let cli = Cli::parse_from(["tempcast", "--latitude", "-90", "--longitude", "180"]);
        assert!(RunConfig::from_cli(&cli).is_ok());
    }

    #[test]
    fn test_cli_invalid_latitude_returns_error() {
        let cli = Cli::parse_from(["tempcast", "--latitude", "-90.01"]);
        assert!(matches!(
            RunConfig::from_cli(&cli),
            Err(CliError::InvalidLatitude(_))
        ));
    }
}
