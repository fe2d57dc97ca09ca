//! Command-line interface parsing for tempcast
//!
//! Every flag defaults to the standard request, so running with no arguments
//! fetches the default location and variable.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::request::{
    DEFAULT_FORECAST_DAYS, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_PAST_MINUTELY_15,
    DEFAULT_TIMEZONE, DEFAULT_VARIABLE,
};
use crate::data::ForecastRequest;

/// Longest forecast horizon the API serves
pub const MAX_FORECAST_DAYS: u32 = 16;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid latitude: {0}. Must be between -90 and 90")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0}. Must be between -180 and 180")]
    InvalidLongitude(f64),

    #[error("Invalid forecast days: {0}. Must be between 1 and 16")]
    InvalidForecastDays(u32),

    #[error("Invalid variable name: '{0}'")]
    InvalidVariable(String),
}

/// tempcast - current and 15-minutely temperature from Open-Meteo
#[derive(Parser, Debug)]
#[command(name = "tempcast")]
#[command(about = "Print current and 15-minutely temperature forecasts from Open-Meteo")]
#[command(version)]
pub struct Cli {
    /// Latitude in degrees
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in degrees
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Variable to fetch; repeat for more columns
    #[arg(long = "variable", value_name = "NAME", default_values_t = [DEFAULT_VARIABLE.to_string()])]
    pub variables: Vec<String>,

    /// Timezone label sent with the request
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Number of past 15-minute intervals to include
    #[arg(long, default_value_t = DEFAULT_PAST_MINUTELY_15)]
    pub past_minutely_15: u32,

    /// Number of forecast days
    #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS)]
    pub forecast_days: u32,

    /// Directory for cached responses (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for one run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub request: ForecastRequest,
    pub cache_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Validates parsed CLI arguments into a run configuration.
    ///
    /// Duplicate variables are dropped, keeping the first occurrence.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if !(-90.0..=90.0).contains(&cli.latitude) {
            return Err(CliError::InvalidLatitude(cli.latitude));
        }
        if !(-180.0..=180.0).contains(&cli.longitude) {
            return Err(CliError::InvalidLongitude(cli.longitude));
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&cli.forecast_days) {
            return Err(CliError::InvalidForecastDays(cli.forecast_days));
        }

        let mut variables: Vec<String> = Vec::with_capacity(cli.variables.len());
        for variable in &cli.variables {
            let variable = variable.trim();
            if variable.is_empty() || variable.contains(',') {
                return Err(CliError::InvalidVariable(variable.to_string()));
            }
            if !variables.iter().any(|v| v == variable) {
                variables.push(variable.to_string());
            }
        }

        Ok(RunConfig {
            request: ForecastRequest {
                latitude: cli.latitude,
                longitude: cli.longitude,
                variables,
                timezone: cli.timezone.clone(),
                past_minutely_15: cli.past_minutely_15,
                forecast_days: cli.forecast_days,
            },
            cache_dir: cli.cache_dir.clone(),
        })
    }
}
