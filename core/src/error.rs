//! Error types for the management API client.
//!
//! # Design
//! Failures are split by who can fix them. `InvalidArgument` and `State` are
//! raised before anything touches the network: the first is bad caller input,
//! the second is builder misuse. `Network` covers transport failures (DNS,
//! refused connections, timeouts) and is the only retryable kind. `Api`
//! carries the raw status code and body of any non-2xx response so callers
//! can inspect what the remote rejected.

use thiserror::Error;

/// Errors returned by the request pipeline and the endpoint wrappers.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A caller-supplied argument was empty or had the wrong shape.
    #[error("invalid argument: `{name}` is empty or malformed")]
    InvalidArgument { name: String },

    /// The request builder was used out of order (no method, no path).
    #[error("request builder misuse: {0}")]
    State(String),

    /// The request never produced an HTTP response.
    #[error("network error: {cause}")]
    Network { cause: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid_argument(name: impl Into<String>) -> Self {
        Error::InvalidArgument { name: name.into() }
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Only transport failures are worth retrying; an `Api` error will be
    /// rejected the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Body of an `Api` error decoded as JSON, if it is JSON.
    pub fn api_body_json(&self) -> Option<serde_json::Value> {
        match self {
            Error::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}
