//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The fetch stage, talking to OpenWeatherMap
//! - The normalize stage, turning raw payloads into a [`WeatherReport`]
//! - A state controller that renderers observe through a [`ViewModel`]
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod state;

pub use config::{Config, OpenWeatherSettings};
pub use error::{Endpoint, WeatherError};
pub use model::{
    CurrentConditions, ForecastPoint, Query, RawWeather, Status, UvIndex, ViewModel,
    WeatherReport,
};
pub use normalize::normalize;
pub use provider::{WeatherSource, fetch_report, openweather::OpenWeatherProvider};
pub use state::{QueryOutcome, USER_ERROR_MESSAGE, WeatherController};
