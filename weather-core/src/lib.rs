//! Core library for the weather web front-end.
//!
//! This crate defines:
//! - Configuration (API key, upstream endpoint)
//! - The `WeatherProvider` abstraction and its OpenWeather implementation
//! - Normalized records handed to the rendering layer
//!
//! It is used by `weather-web`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod time;

pub use config::Config;
pub use error::FetchError;
pub use model::{CitySummary, Forecast, ForecastPoint, WeatherRecord};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
