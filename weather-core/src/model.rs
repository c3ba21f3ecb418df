use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// Visibility reported when an upstream forecast entry omits it (metres).
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// Current conditions for a single city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u8,
    pub wind: f64,
    pub lat: f64,
    pub lon: f64,
    /// OpenWeather condition icon code, e.g. `10d`.
    pub icon: Option<String>,
}

/// One three-hour step of the five-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// `None` when the upstream `dt_txt` did not parse.
    pub timestamp: Option<NaiveDateTime>,
    pub date_str: String,
    /// Raw upstream `dt_txt`, kept for display when parsing failed.
    pub raw_time: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: u8,
    pub wind: f64,
    pub pressure: u32,
    pub visibility: u32,
}

impl ForecastPoint {
    /// `HH:MM` for display.
    pub fn time_label(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.format("%H:%M").to_string(),
            None => self
                .raw_time
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub name: String,
    pub country: String,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub city: CitySummary,
    pub points: Vec<ForecastPoint>,
}

/// Round to exactly one decimal place.
///
/// Works on the exact decimal expansion of `value` with ties to even, so
/// `21.25` becomes `21.2` and `0.15` (stored as 0.1499...) becomes `0.1`.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
