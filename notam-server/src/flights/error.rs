//! Flight table error types.

use std::path::PathBuf;

use crate::domain::{InvalidAirportCode, InvalidFlightNumber};

/// Errors that can occur while loading the flight table.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    /// Table file could not be read
    #[error("failed to read flight table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table is not a JSON object of `"flight": ["DEP", "ARR"]`
    #[error("flight table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A key is not a valid flight number
    #[error(transparent)]
    InvalidFlight(#[from] InvalidFlightNumber),

    /// A departure or arrival code is not a valid ICAO code
    #[error("flight {flight}: {source}")]
    InvalidAirport {
        flight: String,
        #[source]
        source: InvalidAirportCode,
    },
}
