//! Error types for the geocoding client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The provider answered with a non-success status or an error payload.
    /// The message is surfaced to callers verbatim.
    #[error("{0}")]
    Provider(String),

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered 2xx but the body did not match the expected shape.
    #[error("failed to decode geocoding response: {0}")]
    Decode(String),

    /// Client-side misconfiguration (bad base URL, missing credentials).
    #[error("invalid geocoding configuration: {0}")]
    Config(String),
}
