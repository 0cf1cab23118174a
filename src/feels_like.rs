//! Apparent ("feels like") temperature.
//!
//! Combines a wind chill term, a summer simmer heat index and an optional
//! solar radiation correction. All inputs are optional; see
//! [`apparent_temperature`] for how absence propagates.

/// Summer simmer applies only above this temperature (°C).
pub const SIMMER_THRESHOLD: f64 = 14.5;

/// Reference relative humidity of the summer simmer index, as a fraction.
const RH_REF: f64 = 0.5;

/// Fraction of global radiation absorbed by a person.
const ABSORPTION: f64 = 0.07;

/// Wind chill in °C for temperature `t` (°C) and wind speed `wind_speed` (m/s).
pub fn wind_chill(t: f64, wind_speed: f64) -> f64 {
    15.0 + (1.0 - 15.0 / 37.0) * t + 15.0 / 37.0 * (wind_speed + 1.0).powf(0.16) * (t - 37.0)
}

/// Summer simmer index in °C. `humidity` is relative humidity in percent.
pub fn summer_simmer(t: f64, humidity: f64) -> f64 {
    if t <= SIMMER_THRESHOLD {
        return t;
    }

    let r = humidity / 100.0;
    (1.8 * t - 0.55 * (1.0 - r) * (1.8 * t - 26.0) - 0.55 * (1.0 - RH_REF) * 26.0)
        / (1.8 * (1.0 - 0.55 * (1.0 - RH_REF)))
}

/// Apparent temperature in °C.
///
/// - no temperature: `None`
/// - no wind speed or no humidity: the temperature itself
/// - otherwise `t + (chill - t) + (heat - t)`, plus a radiation term when
///   `radiation` (global radiation, W/m²) is present
pub fn apparent_temperature(
    temperature: Option<f64>,
    wind_speed: Option<f64>,
    humidity: Option<f64>,
    radiation: Option<f64>,
) -> Option<f64> {
    let t = temperature?;
    let (Some(ws), Some(rh)) = (wind_speed, humidity) else {
        return Some(t);
    };

    let chill = wind_chill(t, ws);
    let heat = summer_simmer(t, rh);
    let mut feels_like = t + (chill - t) + (heat - t);

    if let Some(rad) = radiation {
        feels_like += 0.7 * ABSORPTION * rad / (ws + 10.0) - 0.25;
    }

    Some(feels_like)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_no_temperature() {
        assert_eq!(apparent_temperature(None, Some(3.0), Some(50.0), Some(100.0)), None);
    }

    #[test]
    fn test_missing_wind_or_humidity_returns_temperature() {
        assert_eq!(apparent_temperature(Some(10.0), None, None, None), Some(10.0));
        assert_eq!(apparent_temperature(Some(-4.5), None, Some(80.0), None), Some(-4.5));
        assert_eq!(apparent_temperature(Some(25.0), Some(2.0), None, Some(500.0)), Some(25.0));
    }

    #[test]
    fn test_summer_simmer_below_threshold() {
        assert_eq!(summer_simmer(14.5, 95.0), 14.5);
        assert_eq!(summer_simmer(-20.0, 10.0), -20.0);
    }

    #[test]
    fn test_summer_simmer_at_reference_humidity() {
        // at 50 % humidity the index is the temperature itself
        assert!((summer_simmer(20.0, 50.0) - 20.0).abs() < EPS);
        assert!((summer_simmer(30.0, 50.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_summer_simmer_humid_is_warmer() {
        assert!(summer_simmer(28.0, 90.0) > summer_simmer(28.0, 30.0));
    }

    #[test]
    fn test_cold_without_radiation_is_wind_chill() {
        let t = 5.0;
        let ws = 6.0;
        let got = apparent_temperature(Some(t), Some(ws), Some(70.0), None).unwrap();
        assert!((got - wind_chill(t, ws)).abs() < EPS);
    }

    #[test]
    fn test_warm_closed_form() {
        let (t, rh, ws) = (20.0_f64, 60.0_f64, 3.0_f64);
        let chill = 15.0 + (1.0 - 15.0 / 37.0) * t + 15.0 / 37.0 * (ws + 1.0).powf(0.16) * (t - 37.0);
        let r = rh / 100.0;
        let heat = (1.8 * t - 0.55 * (1.0 - r) * (1.8 * t - 26.0) - 0.55 * 0.5 * 26.0)
            / (1.8 * (1.0 - 0.55 * 0.5));
        let expected = t + (chill - t) + (heat - t);

        let got = apparent_temperature(Some(t), Some(ws), Some(rh), None).unwrap();
        assert!((got - expected).abs() < EPS, "{got} != {expected}");
    }

    #[test]
    fn test_radiation_correction() {
        let base = apparent_temperature(Some(20.0), Some(3.0), Some(60.0), None).unwrap();
        let with_sun = apparent_temperature(Some(20.0), Some(3.0), Some(60.0), Some(400.0)).unwrap();
        let expected = 0.7 * 0.07 * 400.0 / 13.0 - 0.25;
        assert!((with_sun - base - expected).abs() < EPS);
    }

    #[test]
    fn test_zero_radiation_still_applies_offset() {
        let base = apparent_temperature(Some(0.0), Some(0.0), Some(50.0), None).unwrap();
        let dark = apparent_temperature(Some(0.0), Some(0.0), Some(50.0), Some(0.0)).unwrap();
        assert!((dark - (base - 0.25)).abs() < EPS);
    }
}
