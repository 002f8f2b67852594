use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{Query, RawWeather, WeatherReport},
    normalize::normalize,
};

pub mod openweather;

/// Fetch stage: retrieves both raw payloads for one query.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Both payloads or nothing; a failure of either request fails the whole fetch.
    async fn fetch_raw(&self, query: &Query) -> Result<RawWeather, WeatherError>;
}

/// Run the full pipeline for one query: fetch both payloads, then normalize them.
pub async fn fetch_report<S>(source: &S, query: &Query) -> Result<WeatherReport, WeatherError>
where
    S: WeatherSource + ?Sized,
{
    let raw = source.fetch_raw(query).await?;

    let report = normalize(&raw).inspect_err(|e| {
        warn!(city = query.city(), error = %e, "provider payload rejected");
    })?;

    debug!(
        city = query.city(),
        resolved = %report.current.city,
        forecast_days = report.forecast.len(),
        "weather report ready"
    );

    Ok(report)
}
