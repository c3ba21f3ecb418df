use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::{
    Config, FetchError,
    error::{CURRENT_UNAVAILABLE, FORECAST_UNAVAILABLE},
    model::{CitySummary, DEFAULT_VISIBILITY_M, Forecast, ForecastPoint, WeatherRecord, round1},
    time::{date_label, epoch_to_local, parse_timestamp},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    config: Config,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, test doubles).
    pub fn with_client(config: Config, http: Client) -> Self {
        Self { config, http }
    }

    /// GET `{base_url}/{endpoint}` and decode the body as JSON.
    ///
    /// Status is returned alongside the body; the caller decides what counts
    /// as success.
    async fn get_json(&self, endpoint: &str, city: &str) -> Result<(StatusCode, Value), FetchError> {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        Ok((status, serde_json::from_str(&body)?))
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let (status, body) = self.get_json("weather", city).await?;

        if status != StatusCode::OK || body.get("main").is_none() {
            return Err(FetchError::Unavailable {
                message: CURRENT_UNAVAILABLE,
                status,
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_value(body)?;
        parsed.into_record()
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, FetchError> {
        let (status, body) = self.get_json("forecast", city).await?;

        if status != StatusCode::OK || body.get("list").is_none() {
            return Err(FetchError::Unavailable {
                message: FORECAST_UNAVAILABLE,
                status,
            });
        }

        let parsed: OwForecastResponse = serde_json::from_value(body)?;
        parsed.into_forecast()
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.config.base_url)
            .field("api_key", &if self.config.has_api_key() { "<set>" } else { "<missing>" })
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    coord: OwCoord,
}

impl OwCurrentResponse {
    fn into_record(self) -> Result<WeatherRecord, FetchError> {
        let condition = first_condition(self.weather)?;

        Ok(WeatherRecord {
            city: self.name,
            temperature: round1(self.main.temp),
            description: condition.description,
            humidity: self.main.humidity,
            wind: round1(self.wind.speed),
            lat: self.coord.lat,
            lon: self.coord.lon,
            icon: condition.icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
    sunrise: i64,
    sunset: i64,
}

impl OwCity {
    fn into_summary(self) -> Result<CitySummary, FetchError> {
        let local = |secs: i64, what: &str| {
            epoch_to_local(secs)
                .ok_or_else(|| FetchError::Malformed(format!("{what} timestamp out of range: {secs}")))
        };

        Ok(CitySummary {
            sunrise: local(self.sunrise, "sunrise")?,
            sunset: local(self.sunset, "sunset")?,
            name: self.name,
            country: self.country,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
}

impl OwForecastEntry {
    fn into_point(self) -> Result<ForecastPoint, FetchError> {
        let timestamp = parse_timestamp(&self.dt_txt);

        Ok(ForecastPoint {
            date_str: date_label(&self.dt_txt, timestamp.as_ref()),
            timestamp,
            raw_time: self.dt_txt,
            temperature: round1(self.main.temp),
            feels_like: round1(self.main.feels_like),
            description: first_condition(self.weather)?.description,
            humidity: self.main.humidity,
            wind: round1(self.wind.speed),
            pressure: self.main.pressure,
            visibility: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    fn into_forecast(self) -> Result<Forecast, FetchError> {
        let points = self
            .list
            .into_iter()
            .map(OwForecastEntry::into_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Forecast {
            city: self.city.into_summary()?,
            points,
        })
    }
}

fn first_condition(weather: Vec<OwWeather>) -> Result<OwWeather, FetchError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Malformed("OpenWeather response has an empty weather list".to_string()))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.fetch_current(city).await.inspect_err(|err| {
            warn!(city, kind = err.kind(), error = %err, "current weather lookup failed");
        })
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError> {
        self.fetch_forecast(city).await.inspect_err(|err| {
            warn!(city, kind = err.kind(), error = %err, "forecast lookup failed");
        })
    }
}
