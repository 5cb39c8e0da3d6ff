//! Airport notices (NOTAMs): fetching, extraction and abbreviation
//! substitution.
//!
//! Key characteristics of the notices source:
//! - One HTML page per airport, at `/airports/{ICAO}/notams.html`
//! - Reached through a forwarding relay; the relay is opaque and returns the
//!   page body unmodified
//! - Each notice sits in its own `<section id="notam-...">` element. The
//!   page structure is undocumented, so the section boundary is configurable

mod client;
mod error;
mod extract;
mod mock;
mod translate;

pub use client::{NotamClient, NotamConfig, NoticeSource};
pub use error::FetchError;
pub use extract::{
    DEFAULT_SECTION_CLOSE, DEFAULT_SECTION_OPEN, Extraction, NO_NOTICES, NoticeExtractor,
    SectionBoundary, strip_tags,
};
pub use mock::{MockNoticeSource, MockSourceError};
pub use translate::{Dictionary, TokenTranslator};
