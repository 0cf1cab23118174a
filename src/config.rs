//! Client settings read from the environment.

use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://tie.digitraffic.fi";
pub const DEFAULT_USER: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as the `Digitraffic-User` header.
    pub user: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user: DEFAULT_USER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `DIGITRAFFIC_BASE_URL`, `DIGITRAFFIC_USER` and
    /// `DIGITRAFFIC_TIMEOUT_SECS`, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let timeout = match lookup("DIGITRAFFIC_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("DIGITRAFFIC_TIMEOUT_SECS is not a number: '{raw}'"))?;
                anyhow::ensure!(secs > 0, "DIGITRAFFIC_TIMEOUT_SECS must be at least 1, got '{raw}'");
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            base_url: lookup("DIGITRAFFIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            user: lookup("DIGITRAFFIC_USER").unwrap_or(defaults.user),
            timeout,
        })
    }

    /// Station metadata resource.
    pub fn station_url(&self, station_id: u64) -> String {
        format!("{}/api/weather/v1/stations/{}", self.base_url, station_id)
    }

    /// Latest sensor values of a station.
    pub fn station_data_url(&self, station_id: u64) -> String {
        format!("{}/data", self.station_url(station_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("DIGITRAFFIC_BASE_URL", "http://localhost:8080/"),
            ("DIGITRAFFIC_USER", "MyOrg/WeatherApp 1.0"),
            ("DIGITRAFFIC_TIMEOUT_SECS", " 3 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.user, "MyOrg/WeatherApp 1.0");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = ClientConfig::from_lookup(lookup(&[("DIGITRAFFIC_TIMEOUT_SECS", "ten")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("DIGITRAFFIC_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("DIGITRAFFIC_TIMEOUT_SECS"));
    }

    #[test]
    fn test_urls() {
        let config = ClientConfig::default();
        assert_eq!(
            config.station_url(14028),
            "https://tie.digitraffic.fi/api/weather/v1/stations/14028"
        );
        assert_eq!(
            config.station_data_url(14028),
            "https://tie.digitraffic.fi/api/weather/v1/stations/14028/data"
        );
    }
}
