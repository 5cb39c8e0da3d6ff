//! Domain types for the NOTAM lookup.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod airport;
mod flight;
mod route;

pub use airport::{AirportCode, InvalidAirportCode};
pub use flight::{FlightNumber, InvalidFlightNumber};
pub use route::RouteEntry;
