use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::ProviderError,
    model::{CurrentObservation, Reading, TemperatureUnit},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of current conditions and the 3-hour forecast.
///
/// The unit is passed on every call; providers keep no session state.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<CurrentObservation, ProviderError>;

    /// Readings at 3-hour spacing over roughly five days, in provider order.
    async fn fetch_forecast(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<Vec<Reading>, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `forecaster configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout_secs(config.timeout_secs())
        .build()?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
