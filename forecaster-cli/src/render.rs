//! Plain-text rendering of a [`DashboardReport`] and the user-facing messages
//! around it.

use forecaster_core::{
    AlertReport, ChartStyle, CurrentConditions, DailySeries, DashboardError, DashboardReport,
    LocationError, check_location,
};

const DEGREE: char = '\u{00B0}';
const CHART_WIDTH: usize = 30;
const RULE: &str = "_____________________________________";

pub const EMPTY_LOCATION_WARNING: &str = "Provide a city name!!";

pub const LOCATION_NOT_FOUND: &str = "\
Location Not Found!!

To make search more precise put the city's name, comma, 2-letter country code.

Examples:
- London, GB
- New York, US
- Paris, FR
- Delhi, IN
- Tokyo, JP

This helps avoid confusion between cities with the same name in different countries.

Common city formats:

United States:
- New York, US
- Los Angeles, US
- Chicago, US

India:
- Delhi, IN
- Mumbai, IN
- Bangalore, IN

United Kingdom:
- London, GB
- Manchester, GB
- Birmingham, GB";

/// Shown before the interactive location prompt.
pub const LOCATION_HELP: &str = "\
For best results, use the format: City, CountryCode

Examples: London, GB / New York, US / Paris, FR / Delhi, IN / Tokyo, JP / Sydney, AU

Common country codes:
- USA: US
- United Kingdom: GB
- India: IN
- Canada: CA
- Australia: AU
- Germany: DE
- France: FR
- Japan: JP
- China: CN

Using the country code helps the weather service identify the correct city.";

/// What to do with a location before any request is made.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Do not fetch; show the message instead.
    Blocked(String),
    /// Fetch, optionally after showing an advisory.
    Proceed(Option<String>),
}

pub fn prepare_submission(location: &str) -> Submission {
    match check_location(location) {
        Err(LocationError::Empty) => Submission::Blocked(EMPTY_LOCATION_WARNING.to_string()),
        Ok(check) if check.needs_advisory() => Submission::Proceed(Some(format_advisory(location))),
        Ok(_) => Submission::Proceed(None),
    }
}

pub fn format_advisory(location: &str) -> String {
    format!(
        "For more accurate results, please use format: City, CountryCode\n\
         \n\
         Examples:\n\
         - London, GB (not just London)\n\
         - New York, US (not just New York)\n\
         - Delhi, IN (not just Delhi)\n\
         \n\
         Attempting to search for \"{location}\" without country code...\n"
    )
}

/// Text for the outcome of one submit. Every provider failure collapses into
/// the same "Location Not Found" guidance.
pub fn outcome_message(result: &Result<DashboardReport, DashboardError>, chart: ChartStyle) -> String {
    match result {
        Ok(report) => render_dashboard(report, chart),
        Err(DashboardError::Provider(_)) => format!("{LOCATION_NOT_FOUND}\n"),
        Err(DashboardError::Location(LocationError::Empty)) => format!("{EMPTY_LOCATION_WARNING}\n"),
    }
}

pub fn render_dashboard(report: &DashboardReport, chart: ChartStyle) -> String {
    let mut out = String::new();
    let degree = format!("{DEGREE}{}", report.unit.symbol());

    render_current(&mut out, &report.current, &degree);

    out.push_str(&format!("{RULE}\n5 Day Min and Max Temperature ({degree})\n\n"));
    if report.daily.is_empty() {
        out.push_str("No forecast data available.\n");
    } else {
        match chart {
            ChartStyle::Bar => render_temperature_bars(&mut out, &report.daily),
            ChartStyle::Line => render_temperature_line(&mut out, &report.daily),
        }
    }

    render_alerts(&mut out, &report.alerts);
    render_sun(&mut out, &report.current);

    out.push_str(&format!("{RULE}\nHumidity Index of 5 days\n\n"));
    render_humidity(&mut out, &report.daily);

    out
}

fn render_current(out: &mut String, current: &CurrentConditions, degree: &str) {
    out.push_str(&format!(
        "{}: {} ({})\n",
        current.location_name, current.status, current.description
    ));
    out.push_str(&format!(
        "Observed at: {} UTC\n",
        current.observed_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(icon) = &current.icon_url {
        out.push_str(&format!("Icon: {icon}\n"));
    }
    out.push_str(&format!("🌡️ Temperature: {}{degree}\n", current.temperature));
    out.push_str(&format!("Feels Like: {}{degree}\n", current.feels_like));
    out.push_str(&format!("☁️ Clouds Coverage: {}%\n", current.cloud_coverage));
    out.push_str(&format!("💨 Wind Speed: {}m/s\n", current.wind_speed));
    out.push_str(&format!("💧 Humidity: {}%\n", current.humidity));
    out.push_str(&format!("⏲️ Pressure: {}mBar\n", current.pressure));
    match current.visibility_km {
        Some(km) => out.push_str(&format!("🛣️ Visibility: {km}km\n")),
        None => out.push_str("🛣️ Visibility: n/a\n"),
    }
}

fn render_temperature_bars(out: &mut String, daily: &DailySeries) {
    let (lo, hi) = temperature_range(daily);

    for day in daily.days() {
        out.push_str(&format!(
            "{} Min {:<w$} {}\n",
            day.date.format("%m/%d"),
            bar(day.min_temp, lo, hi),
            format_temp(day.min_temp),
            w = CHART_WIDTH
        ));
        out.push_str(&format!(
            "      Max {:<w$} {}\n",
            bar(day.max_temp, lo, hi),
            format_temp(day.max_temp),
            w = CHART_WIDTH
        ));
    }
}

fn render_temperature_line(out: &mut String, daily: &DailySeries) {
    let (lo, hi) = temperature_range(daily);

    for day in daily.days() {
        let mut row = vec![' '; CHART_WIDTH + 1];
        if let Some(pos) = day.min_temp.map(|t| scale(t, lo, hi)) {
            row[pos] = 'm';
        }
        if let Some(pos) = day.max_temp.map(|t| scale(t, lo, hi)) {
            row[pos] = if row[pos] == 'm' { '*' } else { 'M' };
        }
        let row: String = row.into_iter().collect();
        out.push_str(&format!(
            "{} |{row}| {} / {}\n",
            day.date.format("%m/%d"),
            format_temp(day.min_temp),
            format_temp(day.max_temp)
        ));
    }
    out.push_str("      m = Min, M = Max, * = both\n");
}

fn render_alerts(out: &mut String, alerts: &AlertReport) {
    out.push_str(&format!("{RULE}\nUpcoming Weather Alerts\n\n"));
    match alerts {
        AlertReport::NoAlerts => out.push_str("No Upcoming Alerts!\n"),
        AlertReport::Alerts(alerts) => {
            for alert in alerts {
                out.push_str(&format!("- {alert}\n"));
            }
        }
    }
}

fn render_sun(out: &mut String, current: &CurrentConditions) {
    out.push_str(&format!("{RULE}\nSunrise and Sunset\n\n"));
    out.push_str(&format!("Sunrise Date: {}\n", current.sunrise.date));
    out.push_str(&format!("--Sunrise Time: {}\n", current.sunrise.time));
    out.push_str(&format!("Sunset Date: {}\n", current.sunset.date));
    out.push_str(&format!("--Sunset Time: {}\n", current.sunset.time));
}

fn render_humidity(out: &mut String, daily: &DailySeries) {
    if daily.is_empty() {
        out.push_str("No forecast data available.\n");
        return;
    }

    for (date, humidity) in daily.humidity_series() {
        let value = humidity.map(f64::from);
        let label = humidity.map(|h| format!("{h}%")).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{} {:<w$} {label}\n",
            date.format("%m/%d"),
            bar(value, 0.0, 100.0),
            w = CHART_WIDTH
        ));
    }
}

/// Chart bounds: always include zero so bars grow from a common origin.
fn temperature_range(daily: &DailySeries) -> (f64, f64) {
    let values = daily.min_temp.iter().chain(daily.max_temp.iter()).flatten().copied();
    values.fold((0.0_f64, 0.0_f64), |(lo, hi), t| (lo.min(t), hi.max(t)))
}

fn scale(value: f64, lo: f64, hi: f64) -> usize {
    if hi <= lo {
        return 0;
    }
    let ratio = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    (ratio * CHART_WIDTH as f64).round() as usize
}

fn bar(value: Option<f64>, lo: f64, hi: f64) -> String {
    value.map(|v| "█".repeat(scale(v, lo, hi))).unwrap_or_default()
}

fn format_temp(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{}{DEGREE}", t.trunc() as i64),
        None => "-".to_string(),
    }
}
