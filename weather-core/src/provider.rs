use crate::{
    Config, FetchError,
    model::{Forecast, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of weather data for the route layer.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`. The name is passed through unchecked.
    async fn current(&self, city: &str) -> Result<WeatherRecord, FetchError>;

    /// Five-day / three-hour forecast for `city`.
    async fn forecast(&self, city: &str) -> Result<Forecast, FetchError>;
}

/// Construct the provider used by the web front-end.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_without_key_still_builds() {
        let provider = provider_from_config(&Config::default());
        assert!(format!("{provider:?}").contains("OpenWeatherProvider"));
    }

    #[test]
    fn provider_debug_does_not_leak_api_key() {
        let provider = provider_from_config(&Config::with_api_key("SECRET_KEY"));
        assert!(!format!("{provider:?}").contains("SECRET_KEY"));
    }
}
