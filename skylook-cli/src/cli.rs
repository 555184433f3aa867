use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, validator::Validation};
use skylook_core::{
    ApiKey, Config, Event, Screen, Session, Settings, Units,
    config::{API_KEY_ENV, CACHE_TTL, FORECAST_HOUR_OPTIONS, is_forecast_hour_option},
    provider_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skylook", version, about = "Current weather and forecast for any location")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeather API key and default preferences.
    Configure,

    /// Show current weather and forecast for a location.
    Show {
        /// City, "City, Country", ZIP or airport code.
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,

        /// Unit system: metric or imperial.
        #[arg(long)]
        units: Option<Units>,

        /// Forecast period in hours: 24, 48, 72 or 120.
        #[arg(long, value_parser = parse_hours)]
        hours: Option<u32>,

        /// Skip sunrise/sunset, coordinates and timezone.
        #[arg(long)]
        no_details: bool,

        /// Print the rendered screen as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up locations from an interactive prompt.
    Interactive,
}

fn parse_hours(value: &str) -> Result<u32, String> {
    let hours: u32 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    if is_forecast_hour_option(hours) {
        Ok(hours)
    } else {
        Err(format!("forecast hours must be one of {FORECAST_HOUR_OPTIONS:?}"))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { location, units, hours, no_details, json } => {
                let defaults = config.settings();
                let settings = Settings {
                    units: units.unwrap_or(defaults.units),
                    forecast_hours: hours.unwrap_or(defaults.forecast_hours),
                    show_details: defaults.show_details && !no_details,
                };
                show(&config, settings, location.join(" "), json).await
            }
            Command::Interactive => interactive::run(&config).await,
        }
    }
}

async fn show(config: &Config, settings: Settings, location: String, json: bool) -> anyhow::Result<()> {
    let screen = match provider_from_config(config) {
        Ok(provider) => {
            let mut session = Session::new(provider, settings, CACHE_TTL);
            session.handle(Event::Submit(location)).await
        }
        Err(e) => Screen::Failed(e),
    };

    render::print(&screen, json)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("32 hexadecimal characters, from https://home.openweathermap.org/api_keys")
        .with_validator(|input: &str| {
            if ApiKey::new(input).is_valid_format() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Expected 32 hexadecimal characters".into()))
            }
        })
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let settings = interactive::prompt_settings(config.settings())
        .context("Failed to read preferences")?;
    config.units = Some(settings.units);
    config.forecast_hours = Some(settings.forecast_hours);
    config.show_details = Some(settings.show_details);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    if std::env::var_os(API_KEY_ENV).is_some() {
        println!("Note: {API_KEY_ENV} is set and takes precedence over the stored key.");
    }

    Ok(())
}
