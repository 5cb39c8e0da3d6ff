//! NOTAM fetch error types.

use std::time::Duration;

/// A failed attempt to retrieve an airport's notices page.
///
/// Every way the round trip through the relay can go wrong ends up here,
/// so callers can tell "could not fetch" apart from "fetched, nothing found".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No complete response within the configured bound
    #[error("timed out after {}s", after.as_secs())]
    Timeout { after: Duration },

    /// Connection, DNS, TLS or relay transport failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Relay or upstream answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be read as text
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether this failure was the timeout bound being hit.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
