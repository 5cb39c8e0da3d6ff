//! NOTAM page HTTP client.
//!
//! Fetches an airport's notices page from the public source through a
//! forwarding relay. The relay is opaque: the target URL is appended to the
//! relay prefix and the body comes back unmodified.

use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::domain::AirportCode;

use super::error::FetchError;

/// Default base URL of the public notices source.
const DEFAULT_SOURCE_BASE: &str = "https://ourairports.com";

/// Default relay prefix; the target URL is appended verbatim.
const DEFAULT_RELAY_PREFIX: &str = "https://corsproxy.io/?";

/// Default bound on a single fetch.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Longest error body kept in a `FetchError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Anything that can produce the raw notices markup for an airport.
///
/// The pipeline only depends on this trait, so it can run against the live
/// client or an in-memory source in tests.
pub trait NoticeSource: Send + Sync {
    /// Retrieve the raw markup of the airport's notices page.
    fn fetch<'a>(&'a self, airport: &'a AirportCode) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Configuration for the NOTAM client.
#[derive(Debug, Clone)]
pub struct NotamConfig {
    /// Base URL of the notices source (no trailing slash)
    pub source_base: String,
    /// Prefix the target URL is appended to; empty for a direct fetch
    pub relay_prefix: String,
    /// Request timeout in seconds, covering connect, headers and body
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl NotamConfig {
    /// Create a config pointing at the public source through the default relay.
    pub fn new() -> Self {
        Self {
            source_base: DEFAULT_SOURCE_BASE.to_string(),
            relay_prefix: DEFAULT_RELAY_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom source base URL (for testing).
    pub fn with_source_base(mut self, url: impl Into<String>) -> Self {
        self.source_base = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the relay prefix.
    pub fn with_relay_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.relay_prefix = prefix.into();
        self
    }

    /// Fetch directly from the source, bypassing any relay.
    pub fn without_relay(self) -> Self {
        self.with_relay_prefix("")
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The notices page of an airport on the source itself.
    pub fn target_url(&self, airport: &AirportCode) -> String {
        format!("{}/airports/{}/notams.html", self.source_base, airport.as_str())
    }

    /// The URL actually requested: the target, routed through the relay.
    pub fn notices_url(&self, airport: &AirportCode) -> String {
        format!("{}{}", self.relay_prefix, self.target_url(airport))
    }

    /// The configured timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NotamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for airport notices pages.
#[derive(Debug, Clone)]
pub struct NotamClient {
    http: reqwest::Client,
    config: NotamConfig,
}

impl NotamClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NotamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the raw notices markup for an airport.
    ///
    /// One request, no retries. Every failure is reported as a `FetchError`;
    /// an empty page is returned as an empty string, never as an error.
    pub async fn fetch_notices(&self, airport: &AirportCode) -> Result<String, FetchError> {
        let url = self.config.notices_url(airport);
        debug!(%airport, %url, "fetching notices page");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e, FetchError::Network))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%airport, status = status.as_u16(), "notices page request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify(e, FetchError::Body))?;

        debug!(%airport, bytes = body.len(), "fetched notices page");
        Ok(body)
    }

    /// Turn a reqwest error into a `FetchError`, singling out timeouts.
    fn classify(&self, err: reqwest::Error, otherwise: fn(reqwest::Error) -> FetchError) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after: self.config.timeout(),
            }
        } else {
            otherwise(err)
        }
    }
}

impl NoticeSource for NotamClient {
    fn fetch<'a>(&'a self, airport: &'a AirportCode) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(self.fetch_notices(airport))
    }
}
