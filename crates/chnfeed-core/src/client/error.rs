//! Transport error type shared by the feed clients.

use thiserror::Error;

/// Any failure talking to the remote service. The executor treats every
/// variant the same way (backoff, then abandon the attempt).
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (timeout, connection, TLS, ...).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Server answered but reported a failure in its envelope.
    #[error("service error: {0}")]
    Api(String),
    #[error("operation not supported by {0}")]
    Unsupported(&'static str),
}
