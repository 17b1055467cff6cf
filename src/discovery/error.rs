//! Discovery client errors.

use thiserror::Error;

/// Result alias for discovery client operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Errors surfaced by [`DiscoveryClient`](super::DiscoveryClient).
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// No response was received.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("{url} responded with HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The discovery document has no route with this name.
    #[error("route '{0}' not found in discovery document")]
    RouteNotFound(String),

    /// The base URL and route path do not form a valid URL.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser message.
        message: String,
    },
}
