//! CLI entry point for the Digitraffic road weather client.
//!
//! Provides subcommands for fetching the current weather of a station,
//! parsing saved response bodies offline, and showing station metadata.

use anyhow::Result;
use clap::{Parser, Subcommand};
use digitraffic_weather::{
    config::ClientConfig,
    fetch::{BasicClient, UserHeader, fetch_text},
    observation::Observation,
    output::{append_record, print_json, print_pretty},
    station::{DigitrafficClient, StationApi, describe_station, observe, weather_by_station_id},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "digitraffic_weather")]
#[command(about = "Current road weather from Digitraffic weather stations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current weather of a station
    Weather {
        /// Digitraffic weather station id (e.g. 14028)
        station_id: u64,

        /// Print the observation as JSON
        #[arg(short, long, default_value_t = false)]
        json: bool,

        /// Optional: CSV file to append the observation to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build an observation from saved response bodies
    Parse {
        /// Path or URL of a `/stations/{id}/data` body
        #[arg(short, long, value_name = "FILE_OR_URL")]
        data: String,

        /// Path or URL of a `/stations/{id}` body
        #[arg(short, long, value_name = "FILE_OR_URL")]
        station: String,

        /// Print the observation as JSON
        #[arg(short, long, default_value_t = false)]
        json: bool,

        /// Optional: CSV file to append the observation to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show name and location of a station
    Station {
        /// Digitraffic weather station id (e.g. 14028)
        station_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/digitraffic_weather.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("digitraffic_weather.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    match cli.command {
        Commands::Weather {
            station_id,
            json,
            output,
        } => {
            let client = DigitrafficClient::from_config(config)?;
            let observation = weather_by_station_id(&client, station_id).await?;
            report(&observation, json, output.as_deref())?;
        }
        Commands::Parse {
            data,
            station,
            json,
            output,
        } => {
            let data_body = fetcher(&data, &config).await?;
            let station_body = fetcher(&station, &config).await?;
            let observation = observe(&data_body, &station_body)?;
            report(&observation, json, output.as_deref())?;
        }
        Commands::Station { station_id } => {
            let client = DigitrafficClient::from_config(config)?;
            let body = client.station_metadata(station_id).await?;
            let station = describe_station(&body)?;
            info!(
                station_id = station.id,
                name = station.name.as_deref().unwrap_or("-"),
                latitude = station.coordinates.latitude,
                longitude = station.coordinates.longitude,
                altitude = ?station.coordinates.altitude,
                "Station"
            );
        }
    }

    Ok(())
}

fn report(observation: &Observation, json: bool, output: Option<&str>) -> Result<()> {
    if json {
        print_json(observation)?;
    } else {
        print_pretty(observation);
    }

    if let Some(path) = output {
        append_record(path, observation)?;
        info!(path, "Observation appended");
    }
    Ok(())
}

/// Loads a response body from a local file path or fetches it over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
async fn fetcher(source: &str, config: &ClientConfig) -> Result<String> {
    let body = if source.starts_with("http") {
        let client = UserHeader::new(BasicClient::with_timeout(config.timeout)?, &config.user)?;
        fetch_text(&client, source, &[]).await?
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(body)
}
