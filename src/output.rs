//! Output formatting and persistence for observations.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::observation::Observation;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Flat CSV row for an [`Observation`]. Absent measurements are empty cells.
#[derive(Debug, Serialize)]
pub struct ObservationRow<'a> {
    pub station_id: u64,
    pub name: Option<&'a str>,
    pub latitude: f64,
    pub longitude: f64,
    pub data_updated_time: DateTime<Utc>,
    pub measured_time: Option<DateTime<Utc>>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub dew_point: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_max: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub precipitation_amount: Option<f64>,
    pub radiation_short_wave_acc: Option<f64>,
}

impl<'a> From<&'a Observation> for ObservationRow<'a> {
    fn from(o: &'a Observation) -> Self {
        let d = &o.data;
        ObservationRow {
            station_id: o.station_id,
            name: o.name.as_deref(),
            latitude: o.coordinates.latitude,
            longitude: o.coordinates.longitude,
            data_updated_time: o.data_updated_time,
            measured_time: o.measured_time,
            temperature: d.temperature.value,
            feels_like: d.feels_like.value,
            dew_point: d.dew_point.value,
            pressure: d.pressure.value,
            humidity: d.humidity.value,
            wind_direction: d.wind_direction.value,
            wind_speed: d.wind_speed.value,
            wind_gust: d.wind_gust.value,
            wind_max: d.wind_max.value,
            cloud_cover: d.cloud_cover.value,
            precipitation_amount: d.precipitation_amount.value,
            radiation_short_wave_acc: d.radiation_short_wave_acc.value,
        }
    }
}

/// Logs an observation in a human readable form.
pub fn print_pretty(observation: &Observation) {
    let d = &observation.data;
    info!(
        station_id = observation.station_id,
        name = observation.name.as_deref().unwrap_or("-"),
        latitude = observation.coordinates.latitude,
        longitude = observation.coordinates.longitude,
        updated = %observation.data_updated_time,
        temperature = %d.temperature,
        feels_like = %d.feels_like,
        humidity = %d.humidity,
        wind_speed = %d.wind_speed,
        wind_direction = %d.wind_direction,
        "Current weather"
    );
    debug!("{:#?}", observation);
}

/// Logs an observation as pretty-printed JSON.
pub fn print_json(observation: &Observation) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(observation)?);
    Ok(())
}

/// Appends an [`Observation`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, observation: &Observation) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(ObservationRow::from(observation))?;
    writer.flush()?;

    Ok(())
}
