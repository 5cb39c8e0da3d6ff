//! Flight route type.

use std::fmt;

use super::AirportCode;

/// Departure and arrival airports of a scheduled flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteEntry {
    pub departure: AirportCode,
    pub arrival: AirportCode,
}

impl RouteEntry {
    pub fn new(departure: AirportCode, arrival: AirportCode) -> Self {
        Self {
            departure,
            arrival,
        }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.departure, self.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_both_ends() {
        let route = RouteEntry::new(
            AirportCode::parse("RKSI").unwrap(),
            AirportCode::parse("RJBB").unwrap(),
        );
        assert_eq!(route.to_string(), "RKSI → RJBB");
    }
}
