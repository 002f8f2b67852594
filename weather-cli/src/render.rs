//! Text renderer for the weather view model.

use std::fmt::{self, Display};

use chrono::{DateTime, TimeZone};
use weather_core::{CurrentConditions, ForecastPoint, UvIndex, ViewModel};

pub const LOADING: &str = "Loading...";

/// Icon for a provider condition group; unknown groups fall back to clear sky.
pub fn condition_icon(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "clear" => "☀️",
        "clouds" => "☁️",
        "rain" => "🌧️",
        "snow" => "🌨️",
        "thunderstorm" => "⚡",
        _ => "☀️",
    }
}

/// e.g. "3:05 PM"
pub fn format_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-I:%M %p").to_string()
}

/// e.g. "Tue, Nov 14, 2023"
pub fn format_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%a, %b %-d, %Y").to_string()
}

fn uv_label(uv: UvIndex) -> &'static str {
    match uv {
        UvIndex::Unknown => "N/A",
    }
}

/// Render the whole widget; observation times are shown in `tz`.
pub fn render<Tz>(view: &ViewModel, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Widget { view, tz }.to_string()
}

struct Widget<'a, Tz> {
    view: &'a ViewModel,
    tz: &'a Tz,
}

impl<Tz> Display for Widget<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.view.is_loading() {
            return writeln!(f, "{LOADING}");
        }
        if let Some(msg) = self.view.error() {
            return writeln!(f, "{msg}");
        }

        if let Some(current) = self.view.displayable() {
            write_current(f, current, self.tz)?;
            if !self.view.forecast.is_empty() {
                writeln!(f)?;
                write_forecast(f, &self.view.forecast)?;
            }
        }
        Ok(())
    }
}

fn write_current<Tz>(f: &mut fmt::Formatter<'_>, current: &CurrentConditions, tz: &Tz) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = current.observed_at.with_timezone(tz);

    writeln!(f, "{}", current.city)?;
    writeln!(f, "{}", format_time(&local))?;
    writeln!(f, "{}", format_date(&local))?;
    writeln!(f)?;
    writeln!(
        f,
        "{}  {}°C  {}",
        condition_icon(&current.condition_label),
        current.temperature_c,
        current.condition_label
    )?;
    writeln!(f)?;
    writeln!(f, "Real feel   {}°C", current.feels_like_c)?;
    writeln!(f, "Humidity    {}%", current.humidity_pct)?;
    writeln!(f, "Wind        {} m/s", current.wind_speed_mps)?;
    writeln!(f, "UV index    {}", uv_label(current.uv_index))
}

fn write_forecast(f: &mut fmt::Formatter<'_>, forecast: &[ForecastPoint]) -> fmt::Result {
    writeln!(f, "5-Day Forecast")?;
    let days: Vec<String> = forecast
        .iter()
        .map(|p| format!("{} {} {}°C", p.day_label, condition_icon(&p.condition_label), p.temperature_c))
        .collect();
    writeln!(f, "{}", days.join("  |  "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use weather_core::Status;

    fn london() -> CurrentConditions {
        CurrentConditions {
            city: "London".into(),
            temperature_c: 15,
            condition_label: "Clouds".into(),
            // 2023-11-14T22:13:20Z
            observed_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            feels_like_c: 15,
            humidity_pct: 70,
            wind_speed_mps: 3.1,
            uv_index: UvIndex::Unknown,
        }
    }

    fn point(day: &str, temp: i32, condition: &str) -> ForecastPoint {
        ForecastPoint {
            day_label: day.into(),
            temperature_c: temp,
            condition_label: condition.into(),
            at: Utc::now(),
        }
    }

    #[test]
    fn icons_match_condition_groups_case_insensitively() {
        assert_eq!(condition_icon("Rain"), "🌧️");
        assert_eq!(condition_icon("SNOW"), "🌨️");
        assert_eq!(condition_icon("thunderstorm"), "⚡");
        assert_eq!(condition_icon("Mist"), condition_icon("Clear"));
    }

    #[test]
    fn time_and_date_use_twelve_hour_en_us_format() {
        let at = london().observed_at;
        assert_eq!(format_time(&at), "10:13 PM");
        assert_eq!(format_date(&at), "Tue, Nov 14, 2023");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let local = at.with_timezone(&tokyo);
        assert_eq!(format_time(&local), "7:13 AM");
        assert_eq!(format_date(&local), "Wed, Nov 15, 2023");
    }

    #[test]
    fn renders_current_and_forecast() {
        let view = ViewModel {
            status: Status::Idle,
            current: Some(london()),
            forecast: vec![point("Tue", 15, "Clouds"), point("Wed", 12, "Rain")],
        };

        let out = render(&view, &Utc);
        assert!(out.starts_with("London\n10:13 PM\nTue, Nov 14, 2023\n"));
        assert!(out.contains("15°C  Clouds"));
        assert!(out.contains("Humidity    70%"));
        assert!(out.contains("Wind        3.1 m/s"));
        assert!(out.contains("UV index    N/A"));
        assert!(out.contains("5-Day Forecast\nTue ☁️ 15°C  |  Wed 🌧️ 12°C"));
    }

    #[test]
    fn loading_and_error_hide_stale_data() {
        let mut view = ViewModel { current: Some(london()), ..ViewModel::default() };

        view.status = Status::Loading;
        assert_eq!(render(&view, &Utc), "Loading...\n");

        view.status = Status::Error("Failed to fetch weather data. Please try again.".into());
        assert_eq!(render(&view, &Utc), "Failed to fetch weather data. Please try again.\n");
    }

    #[test]
    fn forecast_heading_is_fixed_for_short_series() {
        let view = ViewModel {
            status: Status::Idle,
            current: Some(london()),
            forecast: vec![point("Tue", 15, "Clouds")],
        };

        let out = render(&view, &Utc);
        assert!(out.ends_with("\n5-Day Forecast\nTue ☁️ 15°C\n"));
    }

    #[test]
    fn current_only_renders_without_forecast_heading() {
        let view = ViewModel { current: Some(london()), ..ViewModel::default() };

        let out = render(&view, &Utc);
        assert!(out.ends_with("UV index    N/A\n"));
        assert!(!out.contains("Forecast"));
    }

    #[test]
    fn idle_without_data_renders_nothing() {
        assert!(render(&ViewModel::default(), &Utc).is_empty());
    }
}
