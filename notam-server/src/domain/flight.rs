//! Flight number type.

use std::fmt;

/// Error returned when parsing an invalid flight number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight number {input:?}: {reason}")]
pub struct InvalidFlightNumber {
    input: String,
    reason: &'static str,
}

/// The numeric part of a flight designator (e.g. `6001` for `7C6001`).
///
/// Always non-empty and made of ASCII digits only. Leading zeros are
/// significant: `0601` and `601` are different flights as far as the route
/// table is concerned.
///
/// # Examples
///
/// ```
/// use notam_server::domain::FlightNumber;
///
/// let flight = FlightNumber::parse("6001").unwrap();
/// assert_eq!(flight.as_str(), "6001");
///
/// // The operator designator is the caller's business
/// assert!(FlightNumber::parse("7C6001").is_err());
/// assert_eq!(FlightNumber::parse_normalized("7C6001").unwrap(), flight);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightNumber(String);

impl FlightNumber {
    /// Parse a flight number from a string of digits.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightNumber> {
        if s.is_empty() {
            return Err(InvalidFlightNumber {
                input: String::new(),
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFlightNumber {
                input: s.to_string(),
                reason: "must contain only digits 0-9",
            });
        }

        Ok(FlightNumber(s.to_string()))
    }

    /// Parse user input into a flight number.
    ///
    /// Trims whitespace and drops a leading two-character operator
    /// designator (`7C`, `KE`, `OZ`) before validating. A designator always
    /// contains at least one letter, so an all-digit input is left intact.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidFlightNumber> {
        let trimmed = s.trim();
        Self::parse(strip_designator(trimmed))
    }

    /// Returns the flight number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Remove a two-character airline designator prefix if present.
fn strip_designator(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() > 2
        && bytes[..2].iter().all(u8::is_ascii_alphanumeric)
        && bytes[..2].iter().any(u8::is_ascii_alphabetic)
    {
        &s[2..]
    } else {
        s
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({})", self.0)
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn digits_always_parse(s in "[0-9]{1,6}") {
            let flight = FlightNumber::parse(&s).unwrap();
            prop_assert_eq!(flight.as_str(), s.as_str());
        }

        #[test]
        fn designator_is_dropped(designator in "[0-9][A-Z]|[A-Z][0-9A-Z]", number in "[0-9]{1,4}") {
            let input = format!("{designator}{number}");
            let flight = FlightNumber::parse_normalized(&input).unwrap();
            prop_assert_eq!(flight.as_str(), number.as_str());
        }

        #[test]
        fn letters_rejected(s in "[0-9]{0,3}[A-Z][0-9]{0,3}") {
            prop_assert!(FlightNumber::parse(&s).is_err());
        }
    }
}
