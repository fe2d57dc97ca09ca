//! Forecast request parameters

use serde::{Deserialize, Serialize};

/// Default latitude (Berlin)
pub const DEFAULT_LATITUDE: f64 = 52.52;
/// Default longitude (Berlin)
pub const DEFAULT_LONGITUDE: f64 = 13.41;
/// Default variable fetched for both the current snapshot and the series
pub const DEFAULT_VARIABLE: &str = "temperature_2m";
/// Default timezone label
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";
/// Default lookback in 15-minute intervals
pub const DEFAULT_PAST_MINUTELY_15: u32 = 8;
/// Default forecast horizon in days
pub const DEFAULT_FORECAST_DAYS: u32 = 1;

/// Parameters of one forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Variables requested for both `current` and `minutely_15`
    pub variables: Vec<String>,
    pub timezone: String,
    /// How many 15-minute intervals before now to include
    pub past_minutely_15: u32,
    pub forecast_days: u32,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            variables: vec![DEFAULT_VARIABLE.to_string()],
            timezone: DEFAULT_TIMEZONE.to_string(),
            past_minutely_15: DEFAULT_PAST_MINUTELY_15,
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl ForecastRequest {
    /// Query parameters in the order they are sent
    ///
    /// Times are requested as unix timestamps so the series can be decoded
    /// without knowing the location's timezone.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let variables = self.variables.join(",");
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("current", variables.clone()),
            ("minutely_15", variables),
            ("timezone", self.timezone.clone()),
            ("past_minutely_15", self.past_minutely_15.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
            ("timeformat", "unixtime".to_string()),
        ]
    }
}
