use std::fmt;

use thiserror::Error;

/// Which provider endpoint a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    /// Path segment appended to the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current conditions"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city must not be empty")]
    EmptyQuery,

    /// Either request failed to complete or returned a non-success status.
    #[error("failed to fetch weather data")]
    Fetch(#[from] reqwest::Error),

    #[error("malformed {endpoint} response: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },
}

impl WeatherError {
    pub(crate) fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        WeatherError::MalformedResponse { endpoint, reason: reason.into() }
    }
}
