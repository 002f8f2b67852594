use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use weather_core::{Config, OpenWeatherProvider, QueryOutcome, WeatherController};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and a 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and the default city.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name; the configured default city when absent.
        city: Option<String>,
    },

    /// Load the default city, then keep prompting for cities to search.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?;
                let controller = controller(&config)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());

                if controller.submit_query(&city).await == QueryOutcome::Ignored {
                    bail!("City must not be empty.");
                }

                let view = controller.snapshot();
                if let Some(msg) = view.error() {
                    bail!("{msg}");
                }
                print!("{}", render::render(&view, &Local));
                Ok(())
            }
            Command::Interactive => {
                let config = Config::load()?;
                let controller = controller(&config)?;
                search(&controller, &config.default_city).await;

                loop {
                    let input = match Text::new("Search city...").prompt() {
                        Ok(input) => input,
                        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                            break;
                        }
                        Err(e) => return Err(e).context("Failed to read city"),
                    };
                    search(&controller, &input).await;
                }
                Ok(())
            }
        }
    }
}

fn controller(config: &Config) -> anyhow::Result<WeatherController<OpenWeatherProvider>> {
    let settings = config.openweather_settings()?;
    Ok(WeatherController::new(Arc::new(OpenWeatherProvider::new(settings))))
}

async fn search(controller: &WeatherController<OpenWeatherProvider>, city: &str) {
    if city.trim().is_empty() {
        return;
    }

    println!("{}", render::LOADING);
    if controller.submit_query(city).await != QueryOutcome::Ignored {
        print!("{}", render::render(&controller.snapshot(), &Local));
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(&api_key);

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
