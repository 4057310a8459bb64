//! Almanac CLI - command-line caller for the weather core
//!
//! Stands in for the chat-command layer: builds the collaborator graph
//! once at startup, runs one query and renders the structured summary as
//! plain text (or writes the assembled map PNG to disk).

mod error;

use almanac::geocode::{Geocoder, HttpGeocoder};
use almanac::http::ReqwestClient;
use almanac::imagery::{MapService, TileLayer};
use almanac::logging::{default_log_dir, default_log_file, init_logging};
use almanac::settings::{InMemorySettings, SettingsStore, UserSettings};
use almanac::weather::{ConditionsSummary, WeatherClient, WeatherError, WeatherService};
use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use std::path::PathBuf;
use tracing::info;

/// User id the CLI stores its unit preference under.
const CLI_USER: u64 = 0;

#[derive(Debug, Clone, ValueEnum)]
enum LayerArg {
    /// Cloud coverage overlay
    Clouds,
    /// Precipitation intensity overlay
    Precipitation,
    /// Sea-level pressure overlay
    Pressure,
    /// Wind speed overlay
    Wind,
    /// Temperature overlay
    Temperature,
}

impl From<LayerArg> for TileLayer {
    fn from(arg: LayerArg) -> Self {
        match arg {
            LayerArg::Clouds => TileLayer::Clouds,
            LayerArg::Precipitation => TileLayer::Precipitation,
            LayerArg::Pressure => TileLayer::Pressure,
            LayerArg::Wind => TileLayer::Wind,
            LayerArg::Temperature => TileLayer::Temperature,
        }
    }
}

#[derive(Parser)]
#[command(name = "almanac-bot")]
#[command(about = "Weather, forecast and map lookups", version)]
struct Cli {
    /// Use metric units instead of imperial
    #[arg(long, global = true)]
    metric: bool,

    /// Tile cache directory
    #[arg(long, global = true, default_value = "/tmp/almanac")]
    cache_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Current conditions and air quality for a location
    Current {
        /// Place name or "lat, lon" pair
        location: String,
    },
    /// Daily forecast for a location
    Forecast {
        /// Place name or "lat, lon" pair
        location: String,
    },
    /// Assemble a weather map centered on a location
    Map {
        /// Place name or "lat, lon" pair
        location: String,

        /// Zoom level
        #[arg(long, default_value_t = 8)]
        zoom: u8,

        /// Weather overlay layer
        #[arg(long, value_enum, default_value = "clouds")]
        layer: LayerArg,

        /// Output PNG path
        #[arg(long, default_value = "weather-map.png")]
        output: PathBuf,
    },
}

fn require_token(name: &str) -> Result<String, CliError> {
    std::env::var(name).map_err(|_| CliError::Config(format!("{} not set", name)))
}

fn print_summary(summary: &ConditionsSummary) {
    println!("{}", summary.title);
    for line in &summary.description {
        println!("  {}", line);
    }
    for field in &summary.precipitation {
        println!("  {}: {}", field.name, field.value);
    }
    if let Some(field) = &summary.pollution {
        println!("  {}: {}", field.name, field.value);
    }
    println!("{}", summary.attribution);
}

/// Caller-side rendering of the not-found condition. Humor included: the
/// core only reports `LocationNotFound`, what to say about it is ours.
fn not_found_message(location: &str) -> String {
    if location.eq_ignore_ascii_case("mordor") {
        "One does not simply look up Mordor's weather.".to_string()
    } else {
        format!("{} seems to be an invalid location.", location)
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let http = ReqwestClient::new()
        .map_err(|e| CliError::Config(format!("HTTP client setup failed: {}", e)))?;

    let settings_store = InMemorySettings::new();
    settings_store.set(UserSettings::new(CLI_USER, !cli.metric));
    let settings = settings_store.get_settings(CLI_USER);

    let geocoder = HttpGeocoder::new(http.clone(), require_token("GEOCODE_TOKEN")?);
    let owm_token = require_token("OWM_TOKEN")?;

    match cli.command {
        Command::Current { location } => {
            let service = WeatherService::new(WeatherClient::new(http, owm_token), geocoder);
            match service.current_summary(&location, &settings).await {
                Ok(summary) => print_summary(&summary),
                Err(WeatherError::LocationNotFound) => {
                    println!("{}", not_found_message(&location))
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Forecast { location } => {
            let service = WeatherService::new(WeatherClient::new(http, owm_token), geocoder);
            match service.forecast_summary(&location, &settings).await {
                Ok(summary) => {
                    println!("{}", summary.title);
                    for day in &summary.days {
                        println!("  {}", day);
                    }
                }
                Err(WeatherError::LocationNotFound) => {
                    println!("{}", not_found_message(&location))
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Map {
            location,
            zoom,
            layer,
            output,
        } => {
            let point = match geocoder.resolve(&location).await {
                Ok(point) => point,
                Err(almanac::geocode::GeocodeError::LocationNotFound) => {
                    println!("{}", not_found_message(&location));
                    return Ok(());
                }
                Err(e) => return Err(CliError::Weather(e.into())),
            };

            let maps = MapService::new(
                http,
                require_token("MAPTILER_TOKEN")?,
                owm_token,
                &cli.cache_dir,
            )?;
            let png = maps.weather_map(point, zoom, layer.into()).await?;

            std::fs::write(&output, &png).map_err(|error| CliError::FileWrite {
                path: output.display().to_string(),
                error,
            })?;
            info!(output = %output.display(), bytes = png.len(), "map written");
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli).await {
        e.exit();
    }
}
