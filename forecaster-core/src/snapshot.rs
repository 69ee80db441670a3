use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::model::{CurrentObservation, TemperatureUnit};

/// A UTC instant split into its calendar date and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunEvent {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl From<DateTime<Utc>> for SunEvent {
    fn from(instant: DateTime<Utc>) -> Self {
        Self { date: instant.date_naive(), time: instant.time() }
    }
}

/// Current conditions ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub observed_at: DateTime<Utc>,
    pub unit: TemperatureUnit,
    pub temperature: i64,
    pub feels_like: i64,
    pub cloud_coverage: u8,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility_km: Option<f64>,
    /// Short condition group, e.g. "Clouds".
    pub status: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub sunrise: SunEvent,
    pub sunset: SunEvent,
}

impl CurrentConditions {
    pub fn from_observation(obs: &CurrentObservation, unit: TemperatureUnit) -> Self {
        Self {
            location_name: obs.location_name.clone(),
            observed_at: obs.observed_at,
            unit,
            temperature: obs.temperature.round() as i64,
            feels_like: obs.feels_like.round() as i64,
            cloud_coverage: obs.cloud_coverage,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
            pressure: obs.pressure,
            visibility_km: obs.visibility_km,
            status: obs.status.clone(),
            description: title_case(&obs.detailed_status),
            icon_url: obs.icon.as_deref().map(icon_url),
            sunrise: obs.sunrise.into(),
            sunset: obs.sunset.into(),
        }
    }
}

/// Large (4x) OpenWeather icon for an icon code such as `10d`.
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@4x.png")
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
