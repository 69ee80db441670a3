//! One submit: validate, fetch current and forecast, reduce for display.

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    aggregate::{DailySeries, aggregate},
    alerts::{AlertFlags, AlertReport, evaluate_alerts},
    error::DashboardError,
    location::{LocationCheck, check_location},
    model::TemperatureUnit,
    provider::WeatherProvider,
    snapshot::CurrentConditions,
};

/// Everything the presentation layer needs for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub location: String,
    pub unit: TemperatureUnit,
    pub current: CurrentConditions,
    pub daily: DailySeries,
    pub alerts: AlertReport,
}

/// Fetches current conditions, then the forecast, and reduces both.
///
/// An empty location fails before any request is made. Any provider failure
/// aborts the whole report.
pub async fn fetch_dashboard(
    provider: &dyn WeatherProvider,
    location: &str,
    unit: TemperatureUnit,
) -> Result<DashboardReport, DashboardError> {
    let check = check_location(location)?;
    if check != LocationCheck::Valid {
        debug!(?check, location, "location not in 'City, CC' form");
    }

    let location = location.trim();

    let observation = provider.fetch_current(location, unit).await?;
    let readings = provider.fetch_forecast(location, unit).await?;
    info!(location, readings = readings.len(), "fetched weather");

    let daily = aggregate(&readings);
    let alerts = evaluate_alerts(&AlertFlags::from_readings(&readings));

    Ok(DashboardReport {
        location: location.to_string(),
        unit,
        current: CurrentConditions::from_observation(&observation, unit),
        daily,
        alerts,
    })
}
