//! Error types for fetching and parsing station weather.

use thiserror::Error;

/// Failure while turning a response body into a [`GenericRecord`](crate::parser::GenericRecord).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level")]
    NotAnObject,
    #[error("missing list field `{0}`")]
    MissingList(&'static str),
}

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network failure or non-success HTTP status. `message` holds the
    /// response body when the server answered.
    #[error("request to {url} failed (status {status:?}): {message}")]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },
    /// Client setup failed, e.g. an invalid `Digitraffic-User` value.
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("could not decode response: {0}")]
    Decode(#[from] DecodeError),
    /// The body decoded but lacks required station metadata.
    #[error("response is missing required field `{field}`")]
    MalformedResponse { field: &'static str },
    #[error("background build task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WeatherError>;
