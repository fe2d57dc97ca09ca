//! Open-Meteo forecast client
//!
//! Fetches the forecast for a [`ForecastRequest`], reusing a cached response
//! while it is fresh and retrying transient failures, then decodes the JSON
//! body into a [`ForecastResponse`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

use super::{
    CurrentConditions, CurrentValue, ForecastRequest, ForecastResponse, IntervalSeries, Location,
    SeriesColumn, MINUTELY_15_SECONDS,
};
use crate::cache::CacheManager;
use crate::retry::{with_retry, RetryConfig};
use crate::table::validate_series;

/// Base URL for the Open-Meteo forecast API
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Cache TTL for forecast responses in hours
pub const FORECAST_CACHE_TTL_HOURS: i64 = 1;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned status {status}{}", format_reason(.reason))]
    HttpStatus {
        status: StatusCode,
        reason: Option<String>,
    },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Interval series times are empty or unevenly spaced
    #[error("Malformed interval series: {0}")]
    MalformedSeries(String),

    /// Unix timestamp outside the representable range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Request URL could not be built
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn format_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {}", r))
        .unwrap_or_default()
}

impl WeatherError {
    /// Whether a fresh attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(e) => !(e.is_builder() || e.is_redirect() || e.is_decode()),
            Self::HttpStatus { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::REQUEST_TIMEOUT
            }
            _ => false,
        }
    }
}

/// Cache key for a request: SHA-256 of the full request URL
pub fn cache_key(url: &Url) -> String {
    format!("forecast_{:x}", Sha256::digest(url.as_str().as_bytes()))
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    cache: Option<CacheManager>,
    cache_ttl: Duration,
    retry: RetryConfig,
}

impl ForecastClient {
    /// Create a new ForecastClient with default settings and an optional cache
    pub fn new(cache: Option<CacheManager>) -> Self {
        Self {
            client: Client::new(),
            base_url: OPEN_METEO_BASE_URL.to_string(),
            cache,
            cache_ttl: Duration::hours(FORECAST_CACHE_TTL_HOURS),
            retry: RetryConfig::default(),
        }
    }

    /// Use a custom HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Point the client at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Full request URL including query parameters
    pub fn request_url(&self, request: &ForecastRequest) -> Result<Url, WeatherError> {
        Ok(Url::parse_with_params(&self.base_url, request.query_pairs())?)
    }

    /// Fetch the forecast for a request
    ///
    /// Returns the cached response if one exists for the same request URL and
    /// has not expired. Otherwise issues the request with retry, decodes it and
    /// stores it in the cache if every value column matches the time axis.
    ///
    /// # Returns
    /// * `Ok(ForecastResponse)` - Decoded and validated forecast
    /// * `Err(WeatherError)` - Once retries are exhausted, or on a malformed response
    pub async fn fetch_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse, WeatherError> {
        let url = self.request_url(request)?;
        let key = cache_key(&url);

        if let Some(ref cache) = self.cache {
            match cache.read::<ForecastResponse>(&key) {
                Some(cached) if !cached.is_expired => {
                    tracing::debug!(key = %key, cached_at = %cached.cached_at, "Using cached forecast");
                    return Ok(cached.data);
                }
                Some(_) => tracing::debug!(key = %key, "Cached forecast expired"),
                None => tracing::debug!(key = %key, "No cached forecast"),
            }
        }

        tracing::debug!(url = %url, "Fetching forecast");
        let body = with_retry(&self.retry, || self.fetch_body(&url)).await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&body)?;
        let forecast = parse_response(api_response, &request.variables)?;

        if let Some(ref cache) = self.cache {
            // Only responses that tabulate are cached
            if let Err(err) = validate_series(&forecast.minutely_15) {
                tracing::warn!(key = %key, "Not caching unusable forecast: {}", err);
            } else if let Err(err) = cache.write(&key, &forecast, self.cache_ttl) {
                tracing::warn!(key = %key, "Failed to write forecast cache: {}", err);
            }
        }

        Ok(forecast)
    }

    /// One GET attempt, mapping non-success statuses to `HttpStatus`
    async fn fetch_body(&self, url: &Url) -> Result<String, WeatherError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .map(|b| b.reason);
            return Err(WeatherError::HttpStatus { status, reason });
        }

        Ok(response.text().await?)
    }
}

/// Convert a unix timestamp in seconds to UTC
fn timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0).ok_or(WeatherError::InvalidTimestamp(secs))
}

/// Decode the API response, keeping the requested variables in request order
fn parse_response(
    response: OpenMeteoResponse,
    variables: &[String],
) -> Result<ForecastResponse, WeatherError> {
    let current = response
        .current
        .ok_or_else(|| WeatherError::MissingField("current".to_string()))?;
    let minutely_15 = response
        .minutely_15
        .ok_or_else(|| WeatherError::MissingField("minutely_15".to_string()))?;

    Ok(ForecastResponse {
        location: Location {
            latitude: response.latitude,
            longitude: response.longitude,
            elevation: response.elevation,
            timezone: response.timezone,
            timezone_abbreviation: response.timezone_abbreviation,
            utc_offset_seconds: response.utc_offset_seconds,
        },
        current: parse_current(current, variables)?,
        minutely_15: parse_series(minutely_15, variables)?,
    })
}

fn parse_current(
    current: CurrentBlock,
    variables: &[String],
) -> Result<CurrentConditions, WeatherError> {
    let values = variables
        .iter()
        .map(|variable| {
            current
                .values
                .get(variable)
                .map(|value| CurrentValue {
                    variable: variable.clone(),
                    value: *value,
                })
                .ok_or_else(|| WeatherError::MissingField(format!("current.{}", variable)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CurrentConditions {
        time: timestamp(current.time)?,
        interval_seconds: current.interval,
        values,
    })
}

/// Derive `[start, end)` from the time axis
///
/// The axis must be non-empty and spaced by exactly 15 minutes. Value array
/// lengths are not checked here; the table builder rejects mismatches.
fn parse_series(
    mut series: SeriesBlock,
    variables: &[String],
) -> Result<IntervalSeries, WeatherError> {
    let (first, last) = match (series.time.first(), series.time.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(WeatherError::MalformedSeries(
                "minutely_15.time is empty".to_string(),
            ))
        }
    };

    if let Some(pair) = series
        .time
        .windows(2)
        .find(|pair| pair[1] - pair[0] != MINUTELY_15_SECONDS)
    {
        return Err(WeatherError::MalformedSeries(format!(
            "times {} and {} are not {} s apart",
            pair[0], pair[1], MINUTELY_15_SECONDS
        )));
    }

    let end_secs = last
        .checked_add(MINUTELY_15_SECONDS)
        .ok_or(WeatherError::InvalidTimestamp(last))?;

    let columns = variables
        .iter()
        .map(|variable| {
            series
                .values
                .remove(variable)
                .map(|values| SeriesColumn {
                    variable: variable.clone(),
                    values,
                })
                .ok_or_else(|| WeatherError::MissingField(format!("minutely_15.{}", variable)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IntervalSeries {
        start: timestamp(first)?,
        end: timestamp(end_secs)?,
        interval_seconds: MINUTELY_15_SECONDS,
        columns,
    })
}

/// Open-Meteo API response structure (`timeformat=unixtime`)
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_abbreviation: String,
    utc_offset_seconds: i32,
    current: Option<CurrentBlock>,
    minutely_15: Option<SeriesBlock>,
}

/// Current snapshot; every key besides `time` and `interval` is a variable
#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: i64,
    interval: i64,
    #[serde(flatten)]
    values: HashMap<String, Option<f64>>,
}

/// 15-minutely series; every key besides `time` is a variable
#[derive(Debug, Deserialize)]
struct SeriesBlock {
    time: Vec<i64>,
    #[serde(flatten)]
    values: HashMap<String, Vec<Option<f64>>>,
}

/// Error body returned with 4xx statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}
