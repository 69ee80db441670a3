use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature unit applied to every temperature-bearing provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Suffix shown after the degree sign.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// OpenWeather `units` query value.
    pub fn provider_units(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "metric",
            TemperatureUnit::Fahrenheit => "imperial",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// How the temperature chart is drawn. Never changes the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Bar,
    Line,
}

impl ChartStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartStyle::Bar => "bar",
            ChartStyle::Line => "line",
        }
    }

    pub const fn all() -> &'static [ChartStyle] {
        &[ChartStyle::Bar, ChartStyle::Line]
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ChartStyle {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "bar" => Ok(ChartStyle::Bar),
            "line" => Ok(ChartStyle::Line),
            _ => Err(anyhow::anyhow!("Unknown chart style '{value}'. Supported styles: bar, line.")),
        }
    }
}

/// One timestamped observation from the 3-hour forecast stream.
///
/// Temperatures are already expressed in the unit the forecast was requested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub cloud_coverage: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility_km: Option<f64>,
    /// Provider weather condition id (e.g. 500 for light rain).
    pub condition_code: u16,
}

/// The provider's record of conditions right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentObservation {
    pub location_name: String,
    pub observed_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub cloud_coverage: u8,
    pub wind_speed: f64,
    pub pressure: f64,
    pub visibility_km: Option<f64>,
    pub status: String,
    pub detailed_status: String,
    pub icon: Option<String>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}
