//! Search pipeline.
//!
//! Answers "what NOTAMs apply where my flight departs?": resolve the flight
//! number to a route, fetch the departure airport's notices page, extract
//! the notices and translate their abbreviations.
//!
//! [`Session`] layers last-request-wins ordering on top, so a slow early
//! search can never overwrite the result of a later one.

mod orchestrator;
mod session;

pub use orchestrator::{Notices, Outcome, Pipeline, PipelineResult};
pub use session::{RequestToken, SearchOutcome, Session, SessionConfig, SessionView, Sessions};
