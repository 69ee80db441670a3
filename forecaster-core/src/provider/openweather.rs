use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    error::ProviderError,
    model::{CurrentObservation, Reading, TemperatureUnit},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// GET `{base_url}/{endpoint}` and return the body of a successful response.
    async fn get(
        &self,
        endpoint: &str,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", unit.provider_units()),
            ])
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ProviderError::Transport)?;
        debug!(%status, endpoint, bytes = body.len(), "OpenWeather response");

        match status {
            s if s.is_success() => Ok(body),
            StatusCode::NOT_FOUND => Err(ProviderError::LocationNotFound(location.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            s => {
                warn!(status = s.as_u16(), endpoint, "OpenWeather request failed");
                Err(ProviderError::Upstream { status: s.as_u16(), body: truncate_body(&body) })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    main: String,
    description: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    visibility: Option<f64>,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_observation(self) -> Result<CurrentObservation, ProviderError> {
        let location_name = match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {country}", self.name),
            _ => self.name,
        };
        let weather = self.weather.into_iter().next();

        Ok(CurrentObservation {
            location_name,
            observed_at: unix_to_utc(self.dt)?,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            cloud_coverage: self.clouds.all,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            visibility_km: self.visibility.map(metres_to_km),
            status: weather.as_ref().map(|w| w.main.clone()).unwrap_or_else(|| "Unknown".to_string()),
            detailed_status: weather
                .as_ref()
                .map(|w| w.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            icon: weather.and_then(|w| w.icon),
            sunrise: unix_to_utc(self.sys.sunrise)?,
            sunset: unix_to_utc(self.sys.sunset)?,
        })
    }
}

impl OwForecastEntry {
    fn into_reading(self) -> Result<Reading, ProviderError> {
        let weather = self.weather.into_iter().next();

        Ok(Reading {
            timestamp: unix_to_utc(self.dt)?,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            cloud_coverage: self.clouds.all,
            wind_speed: self.wind.speed,
            pressure: self.main.pressure,
            visibility_km: self.visibility.map(metres_to_km),
            condition_code: weather.map(|w| w.id).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<CurrentObservation, ProviderError> {
        let body = self.get("weather", location, unit).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("current weather: {e}")))?;

        parsed.into_observation()
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<Vec<Reading>, ProviderError> {
        let body = self.get("forecast", location, unit).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(format!("forecast: {e}")))?;

        let readings = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_reading)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = readings.len(), "parsed forecast readings");
        Ok(readings)
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, ProviderError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| ProviderError::Parse(format!("timestamp out of range: {ts}")))
}

fn metres_to_km(metres: f64) -> f64 {
    metres / 1000.0
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn forecast_entry_maps_to_reading() {
        let entry: OwForecastEntry = serde_json::from_str(
            r#"{
                "dt": 1717243200,
                "main": {"temp": 0.0, "feels_like": -2.5, "pressure": 1008, "humidity": 93},
                "weather": [{"id": 601, "main": "Snow", "description": "snow", "icon": "13d"}],
                "wind": {"speed": 5.2},
                "clouds": {"all": 100},
                "visibility": 2500
            }"#,
        )
        .unwrap();

        let reading = entry.into_reading().unwrap();
        assert_eq!(reading.temperature, 0.0);
        assert_eq!(reading.condition_code, 601);
        assert_eq!(reading.visibility_km, Some(2.5));
        assert_eq!(reading.timestamp, DateTime::from_timestamp(1717243200, 0).unwrap());
    }

    #[test]
    fn current_location_name_includes_country() {
        let parsed: OwCurrentResponse = serde_json::from_str(
            r#"{
                "name": "Paris",
                "dt": 1717243200,
                "main": {"temp": 21.3, "feels_like": 21.0, "pressure": 1015, "humidity": 55},
                "weather": [],
                "wind": {"speed": 1.5},
                "sys": {"country": "FR", "sunrise": 1717213000, "sunset": 1717270000}
            }"#,
        )
        .unwrap();

        let obs = parsed.into_observation().unwrap();
        assert_eq!(obs.location_name, "Paris, FR");
        assert_eq!(obs.detailed_status, "Unknown");
        assert_eq!(obs.cloud_coverage, 0);
        assert_eq!(obs.visibility_km, None);
        assert_eq!(obs.icon, None);
    }
}
