//! Flight schedule lookup.
//!
//! Maps the numeric part of a flight designator to the route it flies.
//! The table is loaded once at startup, either from a JSON file or from
//! the sample schedule compiled into the binary.

mod error;
mod table;

pub use error::RouteTableError;
pub use table::RouteTable;
