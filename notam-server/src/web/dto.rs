//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{FlightNumber, RouteEntry};
use crate::pipeline::{Outcome, PipelineResult, SessionView};

/// Query for a one-off notices lookup.
#[derive(Debug, Deserialize)]
pub struct NotamQuery {
    /// Flight number, with or without the operator designator
    pub flight: String,
}

/// Body of a session search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Flight number, with or without the operator designator
    pub flight: String,
}

/// A flight's route.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Flight number (digits only)
    pub flight: String,

    /// Departure airport ICAO code
    pub departure: String,

    /// Arrival airport ICAO code
    pub arrival: String,
}

/// Which of the mutually exclusive outcomes a search ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultState {
    UnknownFlight,
    FetchFailed,
    Notices,
    NoNotices,
}

/// Response for a notices lookup.
#[derive(Debug, Serialize)]
pub struct PipelineResultDto {
    /// Flight number searched for
    pub flight: String,

    /// Departure airport, absent for unknown flights
    pub departure: Option<String>,

    /// Arrival airport, absent for unknown flights
    pub arrival: Option<String>,

    /// How the search ended
    pub state: ResultState,

    /// Notice text as published
    pub original: String,

    /// Notice text with abbreviations translated
    pub translated: String,

    /// Why the fetch failed
    pub error: Option<String>,

    /// Number of notices found
    pub notice_count: usize,
}

/// Response for a session.
#[derive(Debug, Serialize)]
pub struct SessionViewDto {
    /// A search is still running
    pub loading: bool,

    /// The search that produced this response was overtaken by a newer one
    pub superseded: bool,

    /// What the session shows now
    pub result: Option<PipelineResultDto>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResult {
    /// Create from a domain route.
    pub fn from_route(flight: &FlightNumber, route: &RouteEntry) -> Self {
        Self {
            flight: flight.to_string(),
            departure: route.departure.to_string(),
            arrival: route.arrival.to_string(),
        }
    }
}

impl PipelineResultDto {
    /// Create from a pipeline result.
    pub fn from_result(result: &PipelineResult) -> Self {
        let (state, error, notice_count) = match &result.outcome {
            Outcome::UnknownFlight => (ResultState::UnknownFlight, None, 0),
            Outcome::FetchFailed(err) => (ResultState::FetchFailed, Some(err.to_string()), 0),
            Outcome::Notices(notices) if notices.count() == 0 => (ResultState::NoNotices, None, 0),
            Outcome::Notices(notices) => (ResultState::Notices, None, notices.count()),
        };

        Self {
            flight: result.flight.to_string(),
            departure: result.route.map(|r| r.departure.to_string()),
            arrival: result.route.map(|r| r.arrival.to_string()),
            state,
            original: result.original().to_string(),
            translated: result.translated().to_string(),
            error,
            notice_count,
        }
    }
}

impl SessionViewDto {
    /// Create from a session view.
    pub fn from_view(view: &SessionView, superseded: bool) -> Self {
        Self {
            loading: view.loading,
            superseded,
            result: view.result.as_deref().map(PipelineResultDto::from_result),
        }
    }
}
