//! Static mapping from station sensor short names to observation fields.
//!
//! [`SENSOR_TABLE`] holds one row per [`Field`], in declaration order, so a
//! field's row is found by index. Adding a sensor takes a new `Field`
//! variant, its row here, a matching member of
//! [`WeatherData`](crate::observation::WeatherData) with an arm in
//! `WeatherData::get`, and its line in
//! [`observation::build`](crate::observation::build).

/// Semantic fields of [`WeatherData`](crate::observation::WeatherData) read
/// directly from sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Temperature,
    DewPoint,
    Pressure,
    Humidity,
    WindDirection,
    WindSpeed,
    WindGust,
    WindMax,
    CloudCover,
    CloudLowCover,
    CloudMidCover,
    CloudHighCover,
    PrecipitationAmount,
    RadiationShortWaveAcc,
    RadiationShortWaveSurfaceNetAcc,
    RadiationLongWaveAcc,
    RadiationLongWaveSurfaceNetAcc,
    RadiationShortWaveDiffSurfaceAcc,
    GeopotentialHeight,
    LandSeaMask,
}

/// Number of [`Field`] variants. `LandSeaMask` must stay the last one.
pub const FIELD_COUNT: usize = Field::LandSeaMask as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorMapping {
    pub field: Field,
    pub short_name: &'static str,
    pub unit: &'static str,
}

const fn row(field: Field, short_name: &'static str, unit: &'static str) -> SensorMapping {
    SensorMapping {
        field,
        short_name,
        unit,
    }
}

/// Canonical unit of the derived apparent temperature.
pub const FEELS_LIKE_UNIT: &str = "°C";

const TABLE: [SensorMapping; FIELD_COUNT] = [
    row(Field::Temperature, "Ilma", "°C"),
    row(Field::DewPoint, "Kaste", "°C"),
    row(Field::Pressure, "Paine", "hPa"),
    row(Field::Humidity, "Koste", "%"),
    row(Field::WindDirection, "TSuunt", "°"),
    row(Field::WindSpeed, "KTuuli", "m/s"),
    row(Field::WindGust, "Puuska", "m/s"),
    row(Field::WindMax, "MTuuli", "m/s"),
    row(Field::CloudCover, "Pilvi", "%"),
    row(Field::CloudLowCover, "PilviA", "%"),
    row(Field::CloudMidCover, "PilviK", "%"),
    row(Field::CloudHighCover, "PilviY", "%"),
    row(Field::PrecipitationAmount, "SadInt", "mm/h"),
    row(Field::RadiationShortWaveAcc, "GlobSat", "W/m²"),
    row(Field::RadiationShortWaveSurfaceNetAcc, "NetLyhS", "W/m²"),
    row(Field::RadiationLongWaveAcc, "PitkSat", "W/m²"),
    row(Field::RadiationLongWaveSurfaceNetAcc, "NetPitkS", "W/m²"),
    row(Field::RadiationShortWaveDiffSurfaceAcc, "HajaSat", "W/m²"),
    row(Field::GeopotentialHeight, "GeopK", "m"),
    row(Field::LandSeaMask, "MaaMeri", ""),
];

// Row order must follow `Field` declaration order.
const _: () = {
    let mut i = 0;
    while i < FIELD_COUNT {
        assert!(TABLE[i].field as usize == i, "SENSOR_TABLE out of Field order");
        i += 1;
    }
};

pub static SENSOR_TABLE: [SensorMapping; FIELD_COUNT] = TABLE;

/// Table row for `field`.
pub fn mapping(field: Field) -> &'static SensorMapping {
    &SENSOR_TABLE[field as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_FIELDS: [Field; 20] = [
        Field::Temperature,
        Field::DewPoint,
        Field::Pressure,
        Field::Humidity,
        Field::WindDirection,
        Field::WindSpeed,
        Field::WindGust,
        Field::WindMax,
        Field::CloudCover,
        Field::CloudLowCover,
        Field::CloudMidCover,
        Field::CloudHighCover,
        Field::PrecipitationAmount,
        Field::RadiationShortWaveAcc,
        Field::RadiationShortWaveSurfaceNetAcc,
        Field::RadiationLongWaveAcc,
        Field::RadiationLongWaveSurfaceNetAcc,
        Field::RadiationShortWaveDiffSurfaceAcc,
        Field::GeopotentialHeight,
        Field::LandSeaMask,
    ];

    #[test]
    fn test_every_field_has_one_row() {
        assert_eq!(SENSOR_TABLE.len(), ALL_FIELDS.len());
        for field in ALL_FIELDS {
            let rows = SENSOR_TABLE.iter().filter(|m| m.field == field).count();
            assert_eq!(rows, 1, "{field:?}");
        }
    }

    #[test]
    fn test_mapping_returns_own_row() {
        for field in ALL_FIELDS {
            assert_eq!(mapping(field).field, field);
        }
        assert_eq!(mapping(Field::LandSeaMask).short_name, "MaaMeri");
    }

    #[test]
    fn test_short_names_are_unique() {
        let names: HashSet<_> = SENSOR_TABLE.iter().map(|m| m.short_name).collect();
        assert_eq!(names.len(), SENSOR_TABLE.len());
    }

    #[test]
    fn test_mapping_lookup() {
        let m = mapping(Field::WindSpeed);
        assert_eq!(m.short_name, "KTuuli");
        assert_eq!(m.unit, "m/s");
        assert_eq!(mapping(Field::Temperature).unit, "°C");
    }
}
