//! Web layer for the NOTAM lookup.
//!
//! A JSON API over the search pipeline. Rendering is left to the client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
