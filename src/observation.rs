//! Builds typed [`Observation`]s from decoded station records.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, WeatherError};
use crate::feels_like::apparent_temperature;
use crate::parser::GenericRecord;
use crate::sensors::{FEELS_LIKE_UNIT, Field, SENSOR_TABLE, mapping};

// JSON pointers of the station metadata inside a record.
const STATION_ID: &str = "/id";
const STATION_NAME: &str = "/properties/name";
const COORDINATES: &str = "/geometry/coordinates";
const DATA_UPDATED_TIME: &str = "/dataUpdatedTime";

/// One physical quantity at one instant. `value` is `None` when the station
/// did not report the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Measurement {
    pub value: Option<f64>,
    pub unit: &'static str,
}

impl Measurement {
    pub fn absent(unit: &'static str) -> Self {
        Self { value: None, unit }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) if self.unit.is_empty() => write!(f, "{v}"),
            Some(v) => write!(f, "{v} {}", self.unit),
            None => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

/// Weather quantities of one observation, in canonical units.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeatherData {
    pub temperature: Measurement,
    pub dew_point: Measurement,
    pub pressure: Measurement,
    pub humidity: Measurement,
    pub wind_direction: Measurement,
    pub wind_speed: Measurement,
    /// Max 3 second average.
    pub wind_gust: Measurement,
    /// Max 10 minute average.
    pub wind_max: Measurement,
    pub cloud_cover: Measurement,
    pub cloud_low_cover: Measurement,
    pub cloud_mid_cover: Measurement,
    pub cloud_high_cover: Measurement,
    pub precipitation_amount: Measurement,
    /// Global (short wave) radiation.
    pub radiation_short_wave_acc: Measurement,
    pub radiation_short_wave_surface_net_acc: Measurement,
    pub radiation_long_wave_acc: Measurement,
    pub radiation_long_wave_surface_net_acc: Measurement,
    pub radiation_short_wave_diff_surface_acc: Measurement,
    pub geopotential_height: Measurement,
    pub land_sea_mask: Measurement,
    /// Derived apparent temperature.
    pub feels_like: Measurement,
}

impl WeatherData {
    pub fn get(&self, field: Field) -> &Measurement {
        match field {
            Field::Temperature => &self.temperature,
            Field::DewPoint => &self.dew_point,
            Field::Pressure => &self.pressure,
            Field::Humidity => &self.humidity,
            Field::WindDirection => &self.wind_direction,
            Field::WindSpeed => &self.wind_speed,
            Field::WindGust => &self.wind_gust,
            Field::WindMax => &self.wind_max,
            Field::CloudCover => &self.cloud_cover,
            Field::CloudLowCover => &self.cloud_low_cover,
            Field::CloudMidCover => &self.cloud_mid_cover,
            Field::CloudHighCover => &self.cloud_high_cover,
            Field::PrecipitationAmount => &self.precipitation_amount,
            Field::RadiationShortWaveAcc => &self.radiation_short_wave_acc,
            Field::RadiationShortWaveSurfaceNetAcc => &self.radiation_short_wave_surface_net_acc,
            Field::RadiationLongWaveAcc => &self.radiation_long_wave_acc,
            Field::RadiationLongWaveSurfaceNetAcc => &self.radiation_long_wave_surface_net_acc,
            Field::RadiationShortWaveDiffSurfaceAcc => &self.radiation_short_wave_diff_surface_acc,
            Field::GeopotentialHeight => &self.geopotential_height,
            Field::LandSeaMask => &self.land_sea_mask,
        }
    }
}

/// Weather at one station at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub station_id: u64,
    pub name: Option<String>,
    pub coordinates: Coordinates,
    pub data_updated_time: DateTime<Utc>,
    /// Latest measurement time among the sensors that made it into `data`.
    pub measured_time: Option<DateTime<Utc>>,
    pub data: WeatherData,
}

/// A single entry of `sensorValues`.
#[derive(Debug, Clone, PartialEq)]
struct RawSensorReading {
    short_name: String,
    value: Option<f64>,
    unit: Option<String>,
    measured_time: Option<DateTime<Utc>>,
}

impl RawSensorReading {
    /// Returns `None` for entries without a short name; those can never be
    /// matched to a field.
    fn from_entry(entry: &Value) -> Option<Self> {
        let short_name = entry.get("shortName")?.as_str()?.to_string();
        Some(Self {
            short_name,
            value: entry.get("value").and_then(Value::as_f64),
            unit: entry.get("unit").and_then(Value::as_str).map(str::to_string),
            measured_time: entry
                .get("measuredTime")
                .and_then(Value::as_str)
                .and_then(parse_time),
        })
    }
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn index_readings(entries: &[Value]) -> HashMap<String, RawSensorReading> {
    entries
        .iter()
        .filter_map(RawSensorReading::from_entry)
        .map(|r| (r.short_name.clone(), r))
        .collect()
}

fn resolve(readings: &HashMap<String, RawSensorReading>, field: Field) -> Measurement {
    let row = mapping(field);
    let Some(reading) = readings.get(row.short_name) else {
        return Measurement::absent(row.unit);
    };

    match (reading.value, reading.unit.as_deref()) {
        (Some(value), Some(unit)) => {
            if unit != row.unit {
                warn!(
                    sensor = row.short_name,
                    raw_unit = unit,
                    canonical_unit = row.unit,
                    "Sensor unit differs from canonical unit, value used as is"
                );
            }
            Measurement {
                value: Some(value),
                unit: row.unit,
            }
        }
        _ => {
            debug!(sensor = row.short_name, "Sensor entry without value or unit");
            Measurement::absent(row.unit)
        }
    }
}

pub(crate) fn station_id(record: &GenericRecord) -> Result<u64> {
    record
        .pointer(STATION_ID)
        .and_then(Value::as_u64)
        .ok_or(WeatherError::MalformedResponse { field: "id" })
}

pub(crate) fn station_name(record: &GenericRecord) -> Option<String> {
    record
        .pointer(STATION_NAME)
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(crate) fn coordinates(record: &GenericRecord) -> Result<Coordinates> {
    let malformed = || WeatherError::MalformedResponse {
        field: "geometry.coordinates",
    };
    let coords = record
        .pointer(COORDINATES)
        .and_then(Value::as_array)
        .ok_or_else(malformed)?;

    // GeoJSON order: longitude, latitude, altitude
    let longitude = coords.first().and_then(Value::as_f64).ok_or_else(malformed)?;
    let latitude = coords.get(1).and_then(Value::as_f64).ok_or_else(malformed)?;
    let altitude = coords.get(2).and_then(Value::as_f64);

    Ok(Coordinates {
        latitude,
        longitude,
        altitude,
    })
}

/// Builds an [`Observation`] from a decoded data record with station
/// metadata attached.
///
/// # Errors
///
/// Returns [`WeatherError::MalformedResponse`] if the station id,
/// coordinates or `dataUpdatedTime` is missing. Missing or malformed sensor
/// entries are not errors; they yield absent measurements.
pub fn build(record: &GenericRecord) -> Result<Observation> {
    let station_id = station_id(record)?;
    let coordinates = coordinates(record)?;
    let data_updated_time = record
        .pointer(DATA_UPDATED_TIME)
        .and_then(Value::as_str)
        .and_then(parse_time)
        .ok_or(WeatherError::MalformedResponse {
            field: "dataUpdatedTime",
        })?;
    let name = station_name(record);

    let entries = record.sensor_entries();
    let readings = index_readings(entries);
    let m = |field| resolve(&readings, field);

    let temperature = m(Field::Temperature);
    let humidity = m(Field::Humidity);
    let wind_speed = m(Field::WindSpeed);
    let radiation_short_wave_acc = m(Field::RadiationShortWaveAcc);

    let feels_like = Measurement {
        value: apparent_temperature(
            temperature.value,
            wind_speed.value,
            humidity.value,
            radiation_short_wave_acc.value,
        ),
        unit: FEELS_LIKE_UNIT,
    };

    let data = WeatherData {
        temperature,
        dew_point: m(Field::DewPoint),
        pressure: m(Field::Pressure),
        humidity,
        wind_direction: m(Field::WindDirection),
        wind_speed,
        wind_gust: m(Field::WindGust),
        wind_max: m(Field::WindMax),
        cloud_cover: m(Field::CloudCover),
        cloud_low_cover: m(Field::CloudLowCover),
        cloud_mid_cover: m(Field::CloudMidCover),
        cloud_high_cover: m(Field::CloudHighCover),
        precipitation_amount: m(Field::PrecipitationAmount),
        radiation_short_wave_acc,
        radiation_short_wave_surface_net_acc: m(Field::RadiationShortWaveSurfaceNetAcc),
        radiation_long_wave_acc: m(Field::RadiationLongWaveAcc),
        radiation_long_wave_surface_net_acc: m(Field::RadiationLongWaveSurfaceNetAcc),
        radiation_short_wave_diff_surface_acc: m(Field::RadiationShortWaveDiffSurfaceAcc),
        geopotential_height: m(Field::GeopotentialHeight),
        land_sea_mask: m(Field::LandSeaMask),
        feels_like,
    };

    let measured_time = SENSOR_TABLE
        .iter()
        .filter(|row| data.get(row.field).is_present())
        .filter_map(|row| readings.get(row.short_name)?.measured_time)
        .max();

    let present = SENSOR_TABLE
        .iter()
        .filter(|row| data.get(row.field).is_present())
        .count();
    debug!(
        station_id,
        sensor_entries = entries.len(),
        present,
        "Observation built"
    );

    Ok(Observation {
        station_id,
        name,
        coordinates,
        data_updated_time,
        measured_time,
        data,
    })
}

/// Builds one observation per record, in order.
pub fn build_series(records: &[GenericRecord]) -> Result<Vec<Observation>> {
    records.iter().map(build).collect()
}

/// Builds the last record of a series. `None` when there is no data.
pub fn latest(records: &[GenericRecord]) -> Result<Option<Observation>> {
    records.last().map(build).transpose()
}
