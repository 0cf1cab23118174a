//! HTTP transport for the Digitraffic API.

mod basic;
pub mod blocking;
mod client;
mod header;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use header::UserHeader;

use std::time::Instant;

use tracing::debug;

use crate::error::{Result, WeatherError};

pub(crate) fn transport_error(url: &str, status: Option<u16>, message: impl ToString) -> WeatherError {
    WeatherError::Transport {
        url: url.to_string(),
        status,
        message: message.to_string(),
    }
}

/// Issues a GET for `url` with `params` appended to the query string and
/// returns the body text.
///
/// # Errors
///
/// Returns [`WeatherError::Transport`] on network failure or a non-success
/// status; for the latter the response body is kept as the message.
#[tracing::instrument(skip_all, fields(url = %url))]
pub async fn fetch_text<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    params: &[(&str, String)],
) -> Result<String> {
    let mut target = reqwest::Url::parse(url).map_err(|e| transport_error(url, None, e))?;
    if !params.is_empty() {
        target.query_pairs_mut().extend_pairs(params);
    }
    debug!(?params, "GET request");

    let start = Instant::now();
    let req = reqwest::Request::new(reqwest::Method::GET, target);
    let resp = client
        .execute(req)
        .await
        .map_err(|e| transport_error(url, None, e))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(url, Some(status.as_u16()), e))?;
    debug!(
        status = status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = body.len(),
        "GET response"
    );

    if !status.is_success() {
        return Err(transport_error(url, Some(status.as_u16()), body));
    }
    Ok(body)
}
