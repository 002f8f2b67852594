use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A city lookup, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    pub fn new(city: &str) -> Result<Self, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// The provider's free tier does not report a UV index, so it is always unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UvIndex {
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name as resolved by the provider, not necessarily the query text.
    pub city: String,
    pub temperature_c: i32,
    /// Provider condition group, e.g. "Clear", "Clouds", "Rain".
    pub condition_label: String,
    pub observed_at: DateTime<Utc>,
    pub feels_like_c: i32,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub uv_index: UvIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Short English weekday in the city's local time, e.g. "Mon".
    pub day_label: String,
    pub temperature_c: i32,
    pub condition_label: String,
    pub at: DateTime<Utc>,
}

/// Output of the normalize stage for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// At most five points, strictly increasing in time.
    pub forecast: Vec<ForecastPoint>,
}

/// Undecoded response bodies from the two provider endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWeather {
    pub current: String,
    pub forecast: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error(String),
}

/// Everything a renderer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewModel {
    pub status: Status,
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<ForecastPoint>,
}

impl ViewModel {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Data is only shown when nothing is loading and no error is pending.
    pub fn displayable(&self) -> Option<&CurrentConditions> {
        match self.status {
            Status::Idle => self.current.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_trims_city() {
        let q = Query::new("  Paris \n").expect("non-empty city");
        assert_eq!(q.city(), "Paris");
    }

    #[test]
    fn query_rejects_blank_city() {
        assert!(matches!(Query::new(""), Err(WeatherError::EmptyQuery)));
        assert!(matches!(Query::new(" \t "), Err(WeatherError::EmptyQuery)));
    }

    #[test]
    fn view_model_hides_data_while_loading_or_failed() {
        let current = CurrentConditions {
            city: "London".into(),
            temperature_c: 15,
            condition_label: "Clouds".into(),
            observed_at: Utc::now(),
            feels_like_c: 15,
            humidity_pct: 70,
            wind_speed_mps: 3.1,
            uv_index: UvIndex::Unknown,
        };

        let mut vm = ViewModel { current: Some(current), ..ViewModel::default() };
        assert!(vm.displayable().is_some());

        vm.status = Status::Loading;
        assert!(vm.is_loading());
        assert!(vm.displayable().is_none());

        vm.status = Status::Error("boom".into());
        assert_eq!(vm.error(), Some("boom"));
        assert!(vm.displayable().is_none());
    }
}
