//! Core data models for tempcast
//!
//! This module contains the request parameters sent to the forecast API and the
//! response types decoded from it.

pub mod request;
pub mod weather;

pub use request::ForecastRequest;
pub use weather::{
    cache_key, ForecastClient, WeatherError, FORECAST_CACHE_TTL_HOURS, OPEN_METEO_BASE_URL,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of one sub-hourly step in seconds
pub const MINUTELY_15_SECONDS: i64 = 900;

/// Location metadata reported by the API for the requested coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude of the grid cell actually used
    pub latitude: f64,
    /// Longitude of the grid cell actually used
    pub longitude: f64,
    /// Elevation in meters above sea level
    pub elevation: f64,
    /// Timezone name, e.g. "Europe/Berlin"
    pub timezone: String,
    /// Timezone abbreviation, e.g. "CEST"
    pub timezone_abbreviation: String,
    /// Offset from UTC in seconds
    pub utc_offset_seconds: i32,
}

/// A single value of a requested variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentValue {
    pub variable: String,
    pub value: Option<f64>,
}

/// Snapshot of current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Time the snapshot refers to
    pub time: DateTime<Utc>,
    /// Length of the interval the snapshot covers in seconds
    pub interval_seconds: i64,
    /// One value per requested variable, in request order
    pub values: Vec<CurrentValue>,
}

impl CurrentConditions {
    /// Looks up the value of a variable by name
    pub fn value(&self, variable: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.variable == variable)
            .and_then(|v| v.value)
    }
}

/// Values of one variable across an interval series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub variable: String,
    pub values: Vec<Option<f64>>,
}

/// Evenly spaced values covering the half-open window `[start, end)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSeries {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval_seconds: i64,
    /// One column per requested variable, in request order
    pub columns: Vec<SeriesColumn>,
}

/// Decoded forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub current: CurrentConditions,
    pub minutely_15: IntervalSeries,
}
