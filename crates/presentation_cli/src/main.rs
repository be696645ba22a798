//! skybrief CLI
//!
//! Resolve places, fetch weather and rewrite it into a friendly summary.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use ai_core::is_llm_error;
use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::ToolResult;
use infrastructure::AppConfig;
use integration_geocoding::{Geocoder, Place};
use integration_weather::{CurrentWeather, DEFAULT_FORECAST_DAYS, WeatherClient};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// skybrief CLI
#[derive(Parser)]
#[command(name = "skybrief-cli")]
#[command(author, version, about = "Weather lookups with friendly summaries", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./skybrief.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a place name to coordinates
    Geocode {
        /// Free-text place name
        city: String,
    },

    /// Current conditions at a coordinate
    Current {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Daily forecast at a coordinate
    Forecast {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Number of days (1-10)
        #[arg(short, long, default_value_t = DEFAULT_FORECAST_DAYS)]
        days: u8,
    },

    /// Rewrite weather details in a friendly tone
    ///
    /// Requires GEMINI_API_KEY.
    Rewrite {
        /// Weather details to rewrite
        text: String,
    },

    /// Geocode a city, fetch current weather and rewrite it
    ///
    /// Requires GEMINI_API_KEY.
    Brief {
        /// Free-text place name
        city: String,
    },
}

/// Output of the `brief` command
#[derive(Debug, Serialize)]
struct Brief {
    place: Place,
    current: CurrentWeather,
    summary: String,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Print the payload or the error object as pretty JSON
fn emit<T: Serialize>(result: &ToolResult<T>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(ExitCode::SUCCESS)
        },
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(err)?);
            Ok(ExitCode::FAILURE)
        },
    }
}

async fn brief(config: &AppConfig, city: &str) -> anyhow::Result<ToolResult<Brief>> {
    let rewriter = config.rewriter()?;
    let geocoder = config.geocoder()?;
    let weather = config.weather_client()?;

    let place = match geocoder.resolve(city).await {
        Ok(place) => place,
        Err(e) => return Ok(Err(e)),
    };
    let current = match weather
        .current(place.location.latitude(), place.location.longitude())
        .await
    {
        Ok(current) => current,
        Err(e) => return Ok(Err(e)),
    };

    debug!(place = %place, "Rewriting current conditions");
    let summary = rewriter.rewrite_or_sentinel(&current.summary()).await;

    Ok(Ok(Brief {
        place,
        current,
        summary,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Geocode { city } => {
            let geocoder = config.geocoder()?;
            emit(&geocoder.resolve(&city).await)
        },

        Commands::Current {
            latitude,
            longitude,
        } => {
            let client = config.weather_client()?;
            emit(&client.current(latitude, longitude).await)
        },

        Commands::Forecast {
            latitude,
            longitude,
            days,
        } => {
            let client = config.weather_client()?;
            emit(&client.forecast(latitude, longitude, days).await)
        },

        Commands::Rewrite { text } => {
            let rewriter = config.rewriter()?;
            let rewritten = rewriter.rewrite_or_sentinel(&text).await;
            println!("{rewritten}");

            if is_llm_error(&rewritten) {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        },

        Commands::Brief { city } => {
            let result = brief(&config, &city).await?;
            let code = emit(&result)?;

            match result {
                Ok(b) if is_llm_error(&b.summary) => Ok(ExitCode::FAILURE),
                _ => Ok(code),
            }
        },
    }
}
