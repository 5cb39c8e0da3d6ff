//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid ICAO airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code {input:?}: {reason}")]
pub struct InvalidAirportCode {
    input: String,
    reason: &'static str,
}

/// A valid 4-letter ICAO airport code.
///
/// ICAO codes are always 4 uppercase ASCII letters. Any `AirportCode` value
/// is valid by construction.
///
/// # Examples
///
/// ```
/// use notam_server::domain::AirportCode;
///
/// let icn = AirportCode::parse("RKSI").unwrap();
/// assert_eq!(icn.as_str(), "RKSI");
///
/// // Lowercase is rejected by `parse` but accepted by `parse_normalized`
/// assert!(AirportCode::parse("rksi").is_err());
/// assert_eq!(AirportCode::parse_normalized(" rksi ").unwrap(), icn);
///
/// // IATA codes are the wrong length
/// assert!(AirportCode::parse("ICN").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 4]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 4 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidAirportCode {
                input: s.to_string(),
                reason: "must be exactly 4 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirportCode {
                input: s.to_string(),
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the airport code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(AirportCode::parse("RKSI").is_ok());
        assert!(AirportCode::parse("RKPC").is_ok());
        assert!(AirportCode::parse("RJBB").is_ok());
        assert!(AirportCode::parse("AAAA").is_ok());
        assert!(AirportCode::parse("ZZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(AirportCode::parse("rksi").is_err());
        assert!(AirportCode::parse("Rksi").is_err());
        assert!(AirportCode::parse("RKSi").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AirportCode::parse("").is_err());
        assert!(AirportCode::parse("ICN").is_err());
        assert!(AirportCode::parse("RKSII").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(AirportCode::parse("RK1I").is_err());
        assert!(AirportCode::parse("RK-I").is_err());
        assert!(AirportCode::parse("RK I").is_err());
        assert!(AirportCode::parse("RKÖ").is_err());
    }

    #[test]
    fn normalized_trims_and_uppercases() {
        let code = AirportCode::parse_normalized("  rjbb\n").unwrap();
        assert_eq!(code.as_str(), "RJBB");
        assert!(AirportCode::parse_normalized("rj b").is_err());
    }

    #[test]
    fn error_mentions_input() {
        let err = AirportCode::parse("ICN").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid airport code \"ICN\": must be exactly 4 characters"
        );
    }

    #[test]
    fn display_and_debug() {
        let code = AirportCode::parse("RKPC").unwrap();
        assert_eq!(format!("{}", code), "RKPC");
        assert_eq!(format!("{:?}", code), "AirportCode(RKPC)");
    }
}
