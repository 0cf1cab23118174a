//! JSON decoder for Digitraffic weather station responses.

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Name of the list field holding sensor entries in a station data body.
pub const SENSOR_VALUES: &str = "sensorValues";

/// A decoded response body: a JSON object whose shape has only been checked
/// as far as the decoder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRecord {
    fields: Value,
}

impl GenericRecord {
    /// Returns the value at a JSON pointer such as `/geometry/coordinates`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.fields.pointer(pointer)
    }

    /// Sensor entries of a data record. Empty for station metadata records.
    pub fn sensor_entries(&self) -> &[Value] {
        self.fields
            .get(SENSOR_VALUES)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Copies `geometry` and `properties` from a station metadata record so
    /// that coordinates and name can be read from this record.
    pub fn attach_station(mut self, station: &GenericRecord) -> Self {
        if let Some(target) = self.fields.as_object_mut() {
            for key in ["geometry", "properties"] {
                if let Some(v) = station.fields.get(key) {
                    target.insert(key.to_string(), v.clone());
                }
            }
        }
        self
    }

    fn from_object(fields: Map<String, Value>) -> Self {
        Self {
            fields: Value::Object(fields),
        }
    }
}

fn decode_object(body: &str) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_str(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Decodes a station data body (`/stations/{id}/data`).
///
/// # Errors
///
/// Returns an error if the body is not JSON, not an object, or has no
/// `sensorValues` array.
pub fn decode(body: &str) -> Result<GenericRecord, DecodeError> {
    let map = decode_object(body)?;
    if !map.get(SENSOR_VALUES).is_some_and(Value::is_array) {
        return Err(DecodeError::MissingList(SENSOR_VALUES));
    }
    Ok(GenericRecord::from_object(map))
}

/// Decodes a station metadata body (`/stations/{id}`), a GeoJSON feature.
pub fn decode_station(body: &str) -> Result<GenericRecord, DecodeError> {
    decode_object(body).map(GenericRecord::from_object)
}
