//! Upcoming-weather alerts derived from the forecast window.

use serde::Serialize;
use std::fmt;

use crate::model::Reading;

/// Conditions expected somewhere in the forecast window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertFlags {
    pub cloud: bool,
    pub rain: bool,
    pub snow: bool,
    pub hurricane: bool,
    pub tornado: bool,
    pub fog: bool,
    pub storm: bool,
}

impl AlertFlags {
    /// A flag is raised when any reading carries a condition id in its
    /// category (OpenWeather condition ids).
    pub fn from_readings(readings: &[Reading]) -> Self {
        readings.iter().fold(Self::default(), |mut flags, r| {
            let code = r.condition_code;
            flags.cloud |= (801..=804).contains(&code);
            flags.rain |= (500..=531).contains(&code);
            flags.snow |= (600..=622).contains(&code);
            flags.fog |= code == 741;
            flags.tornado |= matches!(code, 781 | 900);
            flags.storm |= matches!(code, 901 | 960 | 961);
            flags.hurricane |= matches!(code, 902 | 962);
            flags
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alert {
    Cloud,
    Rain,
    Snow,
    Hurricane,
    Tornado,
    Fog,
    Storm,
}

impl Alert {
    pub fn label(&self) -> &'static str {
        match self {
            Alert::Cloud => "Cloud Alert",
            Alert::Rain => "Rain Alert",
            Alert::Snow => "Snow Alert",
            Alert::Hurricane => "Hurricane Alert",
            Alert::Tornado => "Tornado Alert",
            Alert::Fog => "Fog Alert",
            Alert::Storm => "Storm Alert",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Alert::Cloud => "⛅",
            Alert::Rain => "🌧️",
            Alert::Snow => "❄️",
            Alert::Hurricane => "🌀",
            Alert::Tornado => "🌪️",
            Alert::Fog => "🌫️",
            Alert::Storm => "🌩️",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.icon())
    }
}

/// Result of an alert check. `NoAlerts` means the window was checked and
/// nothing fired; `Alerts` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlertReport {
    NoAlerts,
    Alerts(Vec<Alert>),
}

impl AlertReport {
    pub fn alerts(&self) -> &[Alert] {
        match self {
            AlertReport::NoAlerts => &[],
            AlertReport::Alerts(alerts) => alerts,
        }
    }
}

/// Evaluate flags in fixed order. Rain is only reported under cloud.
pub fn evaluate_alerts(flags: &AlertFlags) -> AlertReport {
    let mut alerts = Vec::new();

    if flags.cloud {
        alerts.push(Alert::Cloud);
        if flags.rain {
            alerts.push(Alert::Rain);
        }
    }

    let independent = [
        (flags.snow, Alert::Snow),
        (flags.hurricane, Alert::Hurricane),
        (flags.tornado, Alert::Tornado),
        (flags.fog, Alert::Fog),
        (flags.storm, Alert::Storm),
    ];
    alerts.extend(independent.into_iter().filter(|(set, _)| *set).map(|(_, alert)| alert));

    if alerts.is_empty() { AlertReport::NoAlerts } else { AlertReport::Alerts(alerts) }
}
