use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::{
    config::OpenWeatherSettings,
    error::{Endpoint, WeatherError},
    model::{Query, RawWeather},
};

use super::WeatherSource;

/// OpenWeatherMap client for the current-conditions and 5-day forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    settings: OpenWeatherSettings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: OpenWeatherSettings) -> Self {
        Self { settings, http: Client::new() }
    }

    async fn fetch_body(&self, endpoint: Endpoint, city: &str) -> Result<String, WeatherError> {
        let url = format!("{}/{}", self.settings.base_url, endpoint.path());
        debug!(%endpoint, %url, "requesting");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.settings.api_key.as_str()),
            ])
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| request_failed(endpoint, e))?;

        let body = res.text().await.map_err(|e| request_failed(endpoint, e))?;

        Ok(body)
    }
}

/// Drops the URL from the error, since its query string carries the API key.
fn request_failed(endpoint: Endpoint, err: reqwest::Error) -> WeatherError {
    let err = err.without_url();
    let status = err.status().map(|s| s.as_u16());
    warn!(%endpoint, ?status, error = %err, "OpenWeather request failed");
    WeatherError::Fetch(err)
}

#[async_trait]
impl WeatherSource for OpenWeatherProvider {
    #[instrument(skip(self, query), fields(city = query.city()))]
    async fn fetch_raw(&self, query: &Query) -> Result<RawWeather, WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.fetch_body(Endpoint::Current, query.city()),
            self.fetch_body(Endpoint::Forecast, query.city()),
        )?;

        Ok(RawWeather { current, forecast })
    }
}
