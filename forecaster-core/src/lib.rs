//! Core library for the `forecaster` weather dashboard.
//!
//! This crate defines:
//! - Per-day aggregation of the 3-hour forecast stream
//! - Location format checks and upcoming-weather alerts
//! - Abstraction over weather providers (OpenWeather included)
//! - Configuration & credentials handling
//!
//! It is used by `forecaster-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod alerts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod snapshot;

pub use aggregate::{DailySeries, DailySummary, aggregate};
pub use alerts::{Alert, AlertFlags, AlertReport, evaluate_alerts};
pub use config::Config;
pub use dashboard::{DashboardReport, fetch_dashboard};
pub use error::{DashboardError, ProviderError};
pub use location::{LocationCheck, LocationError, check_location, validate_location};
pub use model::{ChartStyle, CurrentObservation, Reading, TemperatureUnit};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use snapshot::{CurrentConditions, SunEvent};
