//! Mock notices source for running without network access.
//!
//! Loads sample notices pages from HTML files and serves them as if they
//! had come through the relay.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;

use crate::domain::{AirportCode, InvalidAirportCode};

use super::client::NoticeSource;
use super::error::FetchError;

/// Errors loading mock pages from disk.
#[derive(Debug, thiserror::Error)]
pub enum MockSourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not named after an airport: {source}")]
    BadFileName {
        path: PathBuf,
        #[source]
        source: InvalidAirportCode,
    },

    #[error("no .html pages found in {0:?}")]
    Empty(PathBuf),
}

/// Notices source that serves pre-loaded pages.
///
/// Airports without a page get a 404, the same as the live source.
#[derive(Debug, Clone, Default)]
pub struct MockNoticeSource {
    pages: HashMap<AirportCode, String>,
}

impl MockNoticeSource {
    /// Load pages from a directory.
    ///
    /// Expects files named `{ICAO}.html` (e.g. `RKSI.html`, `RJBB.html`).
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, MockSourceError> {
        let dir = dir.as_ref();
        let dir_err = |source| MockSourceError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut pages = HashMap::new();
        for entry in std::fs::read_dir(dir).map_err(dir_err)? {
            let path = entry.map_err(dir_err)?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let airport = AirportCode::parse_normalized(stem).map_err(|source| {
                MockSourceError::BadFileName {
                    path: path.clone(),
                    source,
                }
            })?;

            let markup = std::fs::read_to_string(&path).map_err(|source| MockSourceError::Io {
                path: path.clone(),
                source,
            })?;
            pages.insert(airport, markup);
        }

        if pages.is_empty() {
            return Err(MockSourceError::Empty(dir.to_path_buf()));
        }

        Ok(Self { pages })
    }

    /// Build a source from in-memory pages.
    pub fn from_pages(pages: impl IntoIterator<Item = (AirportCode, String)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
        }
    }

    /// Airports that have a page, sorted.
    pub fn available_airports(&self) -> Vec<AirportCode> {
        let mut airports: Vec<_> = self.pages.keys().copied().collect();
        airports.sort();
        airports
    }
}

impl NoticeSource for MockNoticeSource {
    fn fetch<'a>(&'a self, airport: &'a AirportCode) -> BoxFuture<'a, Result<String, FetchError>> {
        let page = self.pages.get(airport).cloned().ok_or_else(|| FetchError::Status {
            status: 404,
            body: format!("no mock page for {airport}"),
        });
        Box::pin(async move { page })
    }
}
