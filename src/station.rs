//! Station lookups against the Digitraffic weather API.

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::fetch::{self, BasicClient, HttpClient, UserHeader};
use crate::observation::{self, Coordinates, Observation};
use crate::parser::{decode, decode_station};

/// Source of raw station response bodies.
#[async_trait]
pub trait StationApi: Send + Sync {
    /// Station metadata (`/stations/{id}`), a GeoJSON feature.
    async fn station_metadata(&self, station_id: u64) -> Result<String>;

    /// Latest sensor values (`/stations/{id}/data`).
    async fn station_data(&self, station_id: u64) -> Result<String>;
}

pub struct DigitrafficClient<C> {
    http: C,
    config: ClientConfig,
}

impl<C: HttpClient> DigitrafficClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }
}

impl DigitrafficClient<UserHeader<BasicClient>> {
    /// Client with the configured timeout and `Digitraffic-User` header.
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let basic = BasicClient::with_timeout(config.timeout)
            .context("Failed to build HTTP client")?;
        let http = UserHeader::new(basic, &config.user)
            .with_context(|| format!("Invalid DIGITRAFFIC_USER '{}'", config.user))?;
        Ok(Self::new(http, config))
    }
}

#[async_trait]
impl<C: HttpClient> StationApi for DigitrafficClient<C> {
    async fn station_metadata(&self, station_id: u64) -> Result<String> {
        fetch::fetch_text(&self.http, &self.config.station_url(station_id), &[]).await
    }

    async fn station_data(&self, station_id: u64) -> Result<String> {
        fetch::fetch_text(&self.http, &self.config.station_data_url(station_id), &[]).await
    }
}

/// Identity and location of a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: u64,
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

/// Parses a station metadata body.
pub fn describe_station(body: &str) -> Result<Station> {
    let record = decode_station(body)?;
    Ok(Station {
        id: observation::station_id(&record)?,
        name: observation::station_name(&record),
        coordinates: observation::coordinates(&record)?,
    })
}

/// Decodes a data body and a station metadata body and builds the
/// observation. Synchronous and free of I/O.
pub fn observe(data_body: &str, station_body: &str) -> Result<Observation> {
    let station = decode_station(station_body)?;
    let record = decode(data_body)?.attach_station(&station);
    observation::build(&record)
}

/// Fetches the latest weather of a station.
///
/// Both bodies are fetched first; decoding and building then run on the
/// blocking thread pool and complete or fail as one unit.
#[tracing::instrument(skip(api))]
pub async fn weather_by_station_id<A: StationApi + ?Sized>(
    api: &A,
    station_id: u64,
) -> Result<Observation> {
    let station_body = api.station_metadata(station_id).await?;
    let data_body = api.station_data(station_id).await?;
    debug!(
        station_bytes = station_body.len(),
        data_bytes = data_body.len(),
        "Station bodies received, building observation"
    );

    let observation =
        tokio::task::spawn_blocking(move || observe(&data_body, &station_body)).await??;
    info!(
        station_id,
        updated = %observation.data_updated_time,
        "Observation ready"
    );
    Ok(observation)
}

/// Blocking variant of [`weather_by_station_id`] for callers without an
/// async runtime.
///
/// Must not be called from inside a tokio runtime: reqwest's blocking
/// client panics there. Use [`weather_by_station_id`] instead.
#[tracing::instrument(skip(config))]
pub fn weather_by_station_id_blocking(config: &ClientConfig, station_id: u64) -> Result<Observation> {
    let client = fetch::blocking::client(&config.user, config.timeout)?;
    let station_body = fetch::blocking::fetch_text(&client, &config.station_url(station_id))?;
    let data_body = fetch::blocking::fetch_text(&client, &config.station_data_url(station_id))?;
    observe(&data_body, &station_body)
}
