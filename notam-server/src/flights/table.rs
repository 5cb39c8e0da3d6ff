//! Flight number → route lookup.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{AirportCode, FlightNumber, RouteEntry};

use super::error::RouteTableError;

/// Sample schedule shipped with the binary, used when no table file is given.
const BUILTIN_TABLE: &str = include_str!("../../data/flights.json");

/// Static flight table.
///
/// Loaded in full before the first lookup and never mutated afterwards, so it
/// can be shared behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<FlightNumber, RouteEntry>,
}

impl RouteTable {
    /// The built-in sample table.
    pub fn builtin() -> Result<Self, RouteTableError> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Parse a table from JSON of the form `{"6001": ["RKSI", "RPLL"]}`.
    ///
    /// Any malformed key or airport code fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        let raw: HashMap<String, (String, String)> = serde_json::from_str(json)?;
        build_map(raw).map(|routes| Self { routes })
    }

    /// Read and parse a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouteTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RouteTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Look up the route flown under a flight number.
    ///
    /// Exact match only. `None` is the normal answer for a number that is
    /// not (or not yet, while the user is typing) in the schedule.
    pub fn resolve(&self, flight: &FlightNumber) -> Option<RouteEntry> {
        self.routes.get(flight).copied()
    }

    /// Number of flights in the table.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlightNumber, &RouteEntry)> {
        self.routes.iter()
    }
}

impl FromIterator<(FlightNumber, RouteEntry)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (FlightNumber, RouteEntry)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

/// Validate raw string entries into typed routes.
fn build_map(
    raw: HashMap<String, (String, String)>,
) -> Result<HashMap<FlightNumber, RouteEntry>, RouteTableError> {
    raw.into_iter()
        .map(|(flight, (dep, arr))| -> Result<_, RouteTableError> {
            let number = FlightNumber::parse(&flight)?;
            let airport = |code: &str| {
                AirportCode::parse_normalized(code).map_err(|source| {
                    RouteTableError::InvalidAirport {
                        flight: flight.clone(),
                        source,
                    }
                })
            };
            let route = RouteEntry::new(airport(&dep)?, airport(&arr)?);
            Ok((number, route))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn flight(s: &str) -> FlightNumber {
        FlightNumber::parse(s).unwrap()
    }

    fn airport(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn builtin_table_loads() {
        let table = RouteTable::builtin().unwrap();
        assert!(!table.is_empty());

        let route = table.resolve(&flight("6001")).unwrap();
        assert_eq!(route, RouteEntry::new(airport("RKSI"), airport("RPLL")));
    }

    #[test]
    fn unknown_flight_is_none() {
        let table = RouteTable::builtin().unwrap();
        assert_eq!(table.resolve(&flight("9999")), None);
        // Prefixes of known numbers are not matches
        assert_eq!(table.resolve(&flight("600")), None);
    }

    #[test]
    fn every_known_flight_resolves_to_its_entry() {
        let table = RouteTable::builtin().unwrap();
        for (number, entry) in table.iter() {
            assert_eq!(table.resolve(number), Some(*entry));
        }
    }

    #[test]
    fn from_json_normalizes_airport_case() {
        let table = RouteTable::from_json(r#"{"7": ["rksi", "RJBB"]}"#).unwrap();
        assert_eq!(
            table.resolve(&flight("7")),
            Some(RouteEntry::new(airport("RKSI"), airport("RJBB")))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn from_json_rejects_bad_flight_key() {
        let err = RouteTable::from_json(r#"{"7C1": ["RKSI", "RJBB"]}"#).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidFlight(_)));
    }

    #[test]
    fn from_json_rejects_bad_airport() {
        let err = RouteTable::from_json(r#"{"1": ["ICN", "RJBB"]}"#).unwrap_err();
        assert!(matches!(err, RouteTableError::InvalidAirport { .. }));
        assert!(err.to_string().starts_with("flight 1:"));
    }

    #[test]
    fn from_json_rejects_wrong_shape() {
        let err = RouteTable::from_json(r#"{"1": ["RKSI"]}"#).unwrap_err();
        assert!(matches!(err, RouteTableError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"42": ["RKPK", "RKPC"]}}"#).unwrap();

        let table = RouteTable::load(file.path()).unwrap();
        assert_eq!(
            table.resolve(&flight("42")),
            Some(RouteEntry::new(airport("RKPK"), airport("RKPC")))
        );
    }

    #[test]
    fn load_missing_file() {
        let err = RouteTable::load("/nonexistent/flights.json").unwrap_err();
        assert!(matches!(err, RouteTableError::Io { .. }));
    }

    #[test]
    fn collect_from_iterator() {
        let table: RouteTable = [(
            flight("1"),
            RouteEntry::new(airport("RKSS"), airport("RKPC")),
        )]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 1);
    }
}
