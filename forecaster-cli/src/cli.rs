use anyhow::Context;
use clap::{Parser, Subcommand};
use forecaster_core::{
    ChartStyle, Config, DashboardError, TemperatureUnit, fetch_dashboard, provider_from_config,
};
use inquire::{Password, Select, Text};
use tracing::warn;

use crate::render::{self, Submission};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecaster", version, about = "Weather forecaster dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display defaults.
    Configure,

    /// Show the dashboard for a location.
    Show {
        /// "City, CountryCode", e.g. "London, GB". Prompted for when absent.
        location: Option<String>,

        /// Temperature unit; defaults to the configured one.
        #[arg(long, value_parser = parse_unit)]
        unit: Option<TemperatureUnit>,

        /// Temperature chart style; defaults to the configured one.
        #[arg(long, value_parser = parse_chart)]
        chart: Option<ChartStyle>,
    },
}

fn parse_unit(value: &str) -> anyhow::Result<TemperatureUnit> {
    TemperatureUnit::try_from(value)
}

fn parse_chart(value: &str) -> anyhow::Result<ChartStyle> {
    ChartStyle::try_from(value)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, unit, chart } => show(location, unit, chart).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.default_unit = Select::new("Default temperature unit:", TemperatureUnit::all().to_vec())
        .with_starting_cursor(starting_cursor(TemperatureUnit::all(), config.default_unit))
        .prompt()
        .context("Failed to read temperature unit")?;

    config.default_chart = Select::new("Default graph type:", ChartStyle::all().to_vec())
        .with_starting_cursor(starting_cursor(ChartStyle::all(), config.default_chart))
        .prompt()
        .context("Failed to read graph type")?;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn starting_cursor<T: PartialEq>(options: &[T], current: T) -> usize {
    options.iter().position(|o| *o == current).unwrap_or(0)
}

async fn show(
    location: Option<String>,
    unit: Option<TemperatureUnit>,
    chart: Option<ChartStyle>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let unit = unit.unwrap_or(config.default_unit);
    let chart = chart.unwrap_or(config.default_chart);

    let location = match location {
        Some(location) => location,
        None => {
            println!("{}\n", render::LOCATION_HELP);
            Text::new("Name of the city:")
                .with_placeholder("London, GB")
                .with_help_message("Format: City, Country Code (e.g., London, GB or New York, US)")
                .prompt()
                .context("Failed to read location")?
        }
    };

    match render::prepare_submission(&location) {
        Submission::Blocked(message) => {
            println!("{message}");
            return Ok(());
        }
        Submission::Proceed(Some(advisory)) => println!("{advisory}"),
        Submission::Proceed(None) => {}
    }

    let provider = provider_from_config(&config)?;
    let result = fetch_dashboard(provider.as_ref(), &location, unit).await;

    if let Err(DashboardError::Provider(err)) = &result {
        warn!(kind = err.kind(), error = %err, "weather fetch failed");
    }
    print!("{}", render::outcome_message(&result, chart));
    Ok(())
}
