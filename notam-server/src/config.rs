//! Server configuration from environment variables.
//!
//! | Variable              | Default                      |
//! |-----------------------|------------------------------|
//! | `NOTAM_BIND_ADDR`     | `127.0.0.1:3000`             |
//! | `NOTAM_SOURCE_BASE`   | `https://ourairports.com`    |
//! | `NOTAM_RELAY_PREFIX`  | `https://corsproxy.io/?` (empty disables the relay) |
//! | `NOTAM_TIMEOUT_SECS`  | `15`                         |
//! | `NOTAM_SECTION_OPEN`  | `<section\s+id="notam-`      |
//! | `NOTAM_SECTION_CLOSE` | `</section\s*>`              |
//! | `FLIGHT_TABLE`        | built-in sample schedule     |
//! | `NOTAM_MOCK_DIR`      | unset (live fetches)         |
//! | `NOTAM_SESSION_IDLE_SECS` | `1800`                   |
//! | `NOTAM_MAX_SESSIONS`  | `10000`                      |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::notam::{DEFAULT_SECTION_CLOSE, DEFAULT_SECTION_OPEN, NotamConfig, SectionBoundary};
use crate::pipeline::SessionConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// A variable was set to something unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

impl ConfigError {
    fn new(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Notices source and relay settings
    pub notam: NotamConfig,
    /// Markup delimiting one notice
    pub boundary: SectionBoundary,
    /// Flight table file; the built-in table is used when absent
    pub flight_table: Option<PathBuf>,
    /// Directory of `{ICAO}.html` pages served instead of live fetches
    pub mock_dir: Option<PathBuf>,
    /// Session expiry and cap
    pub sessions: SessionConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = match lookup("NOTAM_BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::new("NOTAM_BIND_ADDR", &value, e))?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .map_err(|e| ConfigError::new("NOTAM_BIND_ADDR", DEFAULT_BIND_ADDR, e))?,
        };

        let mut notam = NotamConfig::new();
        if let Some(base) = lookup("NOTAM_SOURCE_BASE") {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ConfigError::new(
                    "NOTAM_SOURCE_BASE",
                    &base,
                    "must be an http(s) URL",
                ));
            }
            notam = notam.with_source_base(base);
        }
        if let Some(prefix) = lookup("NOTAM_RELAY_PREFIX") {
            notam = if prefix.is_empty() {
                notam.without_relay()
            } else {
                notam.with_relay_prefix(prefix)
            };
        }
        if let Some(secs) = positive(&lookup, "NOTAM_TIMEOUT_SECS")? {
            notam = notam.with_timeout(secs);
        }

        let open = lookup("NOTAM_SECTION_OPEN").unwrap_or_else(|| DEFAULT_SECTION_OPEN.to_string());
        let close =
            lookup("NOTAM_SECTION_CLOSE").unwrap_or_else(|| DEFAULT_SECTION_CLOSE.to_string());
        let boundary = SectionBoundary::new(&open, &close).map_err(|e| {
            ConfigError::new("NOTAM_SECTION_OPEN/CLOSE", &format!("{open} {close}"), e)
        })?;

        let mut sessions = SessionConfig::default();
        if let Some(secs) = positive(&lookup, "NOTAM_SESSION_IDLE_SECS")? {
            sessions.idle_ttl = Duration::from_secs(secs);
        }
        if let Some(max) = positive(&lookup, "NOTAM_MAX_SESSIONS")? {
            sessions.max_sessions = max;
        }

        let path = |var| lookup(var).filter(|v| !v.is_empty()).map(PathBuf::from);

        Ok(Self {
            bind_addr,
            notam,
            boundary,
            flight_table: path("FLIGHT_TABLE"),
            mock_dir: path("NOTAM_MOCK_DIR"),
            sessions,
        })
    }
}

/// A positive integer variable, if set.
fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let n: u64 = value
        .parse()
        .map_err(|e| ConfigError::new(var, &value, e))?;
    if n == 0 {
        return Err(ConfigError::new(var, &value, "must be positive"));
    }
    Ok(Some(n))
}
