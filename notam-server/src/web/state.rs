//! Application state for the web layer.

use crate::pipeline::{Pipeline, SessionConfig, Sessions};

/// Shared application state.
///
/// Cheap to clone; the pipeline's parts and the session registry are
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Flight → notices pipeline
    pub pipeline: Pipeline,

    /// Per-client search sessions
    pub sessions: Sessions,
}

impl AppState {
    /// Create a new app state with no sessions.
    pub fn new(pipeline: Pipeline, sessions: &SessionConfig) -> Self {
        Self {
            pipeline,
            sessions: Sessions::new(sessions),
        }
    }
}
