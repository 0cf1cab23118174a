//! Blocking transport, for callers without an async runtime.
//!
//! Must not be called from inside a tokio runtime.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use super::header::DIGITRAFFIC_USER;
use super::transport_error;
use crate::error::{Result, WeatherError};

/// Builds a blocking client sending the `Digitraffic-User` header.
///
/// # Errors
///
/// Returns [`WeatherError::Config`] if `user` is not a valid header value
/// or the client cannot be built.
pub fn client(user: &str, timeout: Duration) -> Result<reqwest::blocking::Client> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(user)
        .map_err(|e| WeatherError::Config(format!("invalid Digitraffic-User '{user}': {e}")))?;
    headers.insert(DIGITRAFFIC_USER, value);

    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))
}

#[tracing::instrument(skip_all, fields(url = %url))]
pub fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .map_err(|e| transport_error(url, None, e))?;
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| transport_error(url, Some(status.as_u16()), e))?;
    debug!(status = status.as_u16(), bytes = body.len(), "GET response");

    if !status.is_success() {
        return Err(transport_error(url, Some(status.as_u16()), body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::serve;

    #[test]
    fn test_client_rejects_invalid_user() {
        let err = client("bad\nvalue", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
    }

    #[test]
    fn test_fetch_text_sends_user_header() {
        let (base_url, server) = serve(vec![(200, "{}".to_string())]);
        let client = client("MyOrg/WeatherApp 1.0", Duration::from_secs(5)).unwrap();

        let body = fetch_text(&client, &format!("{base_url}/api/weather/v1/stations/9")).unwrap();
        assert_eq!(body, "{}");

        let request = server.join().unwrap()[0].to_lowercase();
        assert!(request.starts_with("get /api/weather/v1/stations/9 http/1.1"), "{request}");
        assert!(request.contains("digitraffic-user: myorg/weatherapp 1.0"), "{request}");
    }

    #[test]
    fn test_fetch_text_non_success_is_transport_error() {
        let (base_url, server) = serve(vec![(503, "maintenance".to_string())]);
        let client = client("MyOrg/WeatherApp 1.0", Duration::from_secs(5)).unwrap();

        let err = fetch_text(&client, &format!("{base_url}/x")).unwrap_err();
        server.join().unwrap();
        assert!(matches!(
            err,
            WeatherError::Transport { status: Some(503), ref message, .. } if message == "maintenance"
        ));
    }
}
