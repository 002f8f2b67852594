//! Normalize stage: decodes provider payloads and projects them into a [`WeatherReport`].
//!
//! Decoding goes through explicit schema structs, so a payload that parses as JSON but
//! lacks a field the widget relies on becomes [`WeatherError::MalformedResponse`]
//! instead of a fault further down.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Endpoint, WeatherError},
    model::{CurrentConditions, ForecastPoint, RawWeather, UvIndex, WeatherReport},
};

/// The forecast series has one sample every 3 hours.
pub const SAMPLES_PER_DAY: usize = 8;
pub const MAX_FORECAST_DAYS: usize = 5;

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
    feels_like: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwCurrentMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwSampleMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSample {
    dt: i64,
    main: OwSampleMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift in seconds from UTC.
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Vec<OwSample>,
}

pub fn normalize(raw: &RawWeather) -> Result<WeatherReport, WeatherError> {
    Ok(WeatherReport {
        current: normalize_current(&raw.current)?,
        forecast: normalize_forecast(&raw.forecast)?,
    })
}

pub fn normalize_current(body: &str) -> Result<CurrentConditions, WeatherError> {
    let endpoint = Endpoint::Current;
    let parsed: OwCurrentResponse = decode(endpoint, body)?;

    let humidity_pct = u8::try_from(parsed.main.humidity)
        .ok()
        .filter(|h| *h <= 100)
        .ok_or_else(|| {
            WeatherError::malformed(endpoint, format!("humidity {} out of range", parsed.main.humidity))
        })?;

    let wind_speed_mps = parsed.wind.speed;
    if !wind_speed_mps.is_finite() || wind_speed_mps < 0.0 {
        return Err(WeatherError::malformed(
            endpoint,
            format!("wind speed {wind_speed_mps} is not a valid speed"),
        ));
    }

    Ok(CurrentConditions {
        city: parsed.name,
        temperature_c: round_half_up(parsed.main.temp),
        condition_label: first_condition(endpoint, parsed.weather)?,
        observed_at: unix_to_utc(endpoint, parsed.dt)?,
        feels_like_c: round_half_up(parsed.main.feels_like),
        humidity_pct,
        wind_speed_mps,
        uv_index: UvIndex::Unknown,
    })
}

/// One point per day: samples 0, 8, 16, ... of the series, at most five of them.
///
/// Days are anchored to the first sample, not to local midnight.
pub fn normalize_forecast(body: &str) -> Result<Vec<ForecastPoint>, WeatherError> {
    let endpoint = Endpoint::Forecast;
    let parsed: OwForecastResponse = decode(endpoint, body)?;

    let offset = match parsed.city.and_then(|c| c.timezone) {
        Some(secs) => FixedOffset::east_opt(secs).ok_or_else(|| {
            WeatherError::malformed(endpoint, format!("timezone offset {secs}s out of range"))
        })?,
        None => Utc.fix(),
    };

    let mut points: Vec<ForecastPoint> = Vec::with_capacity(MAX_FORECAST_DAYS);
    for sample in parsed.list.into_iter().step_by(SAMPLES_PER_DAY).take(MAX_FORECAST_DAYS) {
        let at = unix_to_utc(endpoint, sample.dt)?;

        if points.last().is_some_and(|prev| prev.at >= at) {
            return Err(WeatherError::malformed(
                endpoint,
                format!("samples out of order at dt={}", sample.dt),
            ));
        }

        points.push(ForecastPoint {
            day_label: at.with_timezone(&offset).format("%a").to_string(),
            temperature_c: round_half_up(sample.main.temp),
            condition_label: first_condition(endpoint, sample.weather)?,
            at,
        });
    }

    Ok(points)
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, WeatherError> {
    serde_json::from_str(body).map_err(|e| WeatherError::malformed(endpoint, e.to_string()))
}

fn first_condition(endpoint: Endpoint, weather: Vec<OwWeather>) -> Result<String, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| WeatherError::malformed(endpoint, "empty weather condition list"))
}

fn unix_to_utc(endpoint: Endpoint, ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::malformed(endpoint, format!("timestamp {ts} out of range")))
}

/// Halves round towards positive infinity: 15.5 -> 16, -2.5 -> -2.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    /// 2023-11-14T22:13:20Z, a Tuesday.
    pub const BASE_TS: i64 = 1_700_000_000;

    pub fn london_current() -> Value {
        json!({
            "name": "London",
            "main": { "temp": 15.4, "feels_like": 14.6, "humidity": 70 },
            "wind": { "speed": 3.1 },
            "weather": [{ "main": "Clouds", "description": "broken clouds" }],
            "dt": BASE_TS
        })
    }

    /// `n` samples spaced three hours apart; temperatures encode the index.
    pub fn forecast(n: usize) -> Value {
        let list: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "dt": BASE_TS + (i as i64) * 3 * 3600,
                    "main": { "temp": i as f64 + 0.2 },
                    "weather": [{ "main": if i % 2 == 0 { "Clear" } else { "Rain" } }]
                })
            })
            .collect();

        json!({ "city": { "name": "London", "timezone": 0 }, "list": list })
    }
}
