//! Notice extraction from raw page markup.
//!
//! Two passes, both linear in the input length:
//!
//! 1. **Section scan.** Find every opening section marker, then look for the
//!    closing boundary only between that marker and the next opening marker.
//!    A section whose close never shows up in its window is dropped rather
//!    than swallowing the sections after it.
//! 2. **Tag stripping.** Remove every `<...>` tag from each section and trim
//!    the result. A section with no text left is not a notice.
//!
//! Matching uses the `regex` crate, whose finite-automaton engine has no
//! backtracking, so hostile markup (deep nesting, thousands of unclosed `<`)
//! cannot blow up the running time.

use std::sync::LazyLock;

use regex::Regex;

/// Text shown in place of notices when the page has none.
pub const NO_NOTICES: &str = "No NOTAM found.";

/// Separator placed between consecutive notices.
const NOTICE_SEPARATOR: &str = "\n\n";

/// Default opening marker: a `<section>` whose id starts with `notam-`.
pub const DEFAULT_SECTION_OPEN: &str = r#"<section\s+id="notam-"#;

/// Default closing boundary.
pub const DEFAULT_SECTION_CLOSE: &str = r"</section\s*>";

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// The markup that delimits one notice on the source page.
///
/// The source does not document its page structure, so both ends are plain
/// regexes that can be swapped without touching the scan.
#[derive(Debug, Clone)]
pub struct SectionBoundary {
    open: Regex,
    close: Regex,
}

impl SectionBoundary {
    /// Build a boundary from opening and closing regex sources.
    pub fn new(open: &str, close: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            open: Regex::new(open)?,
            close: Regex::new(close)?,
        })
    }

    /// The opening marker pattern.
    pub fn open_pattern(&self) -> &str {
        self.open.as_str()
    }

    /// The closing boundary pattern.
    pub fn close_pattern(&self) -> &str {
        self.close.as_str()
    }

    /// Find all complete sections, in document order.
    ///
    /// Each returned slice runs from the start of its opening marker to the
    /// end of its closing boundary.
    pub fn sections<'m>(&self, markup: &'m str) -> Vec<&'m str> {
        let opens: Vec<usize> = self.open.find_iter(markup).map(|m| m.start()).collect();

        opens
            .iter()
            .enumerate()
            .filter_map(|(i, &start)| {
                let window_end = opens.get(i + 1).copied().unwrap_or(markup.len());
                let window = &markup[start..window_end];
                self.close
                    .find(window)
                    .map(|close| &markup[start..start + close.end()])
            })
            .collect()
    }
}

impl Default for SectionBoundary {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_OPEN, DEFAULT_SECTION_CLOSE)
            .expect("default section boundary is valid")
    }
}

/// Result of scanning a page for notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The page had no recognizable notice sections.
    NoNotices,
    /// Plain text of each notice, in page order.
    Found(Vec<String>),
}

impl Extraction {
    /// Number of notices found.
    pub fn len(&self) -> usize {
        match self {
            Extraction::NoNotices => 0,
            Extraction::Found(notices) => notices.len(),
        }
    }

    /// Whether no notices were found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The notices as displayed: joined by blank lines, or the
    /// "no notices" sentinel.
    pub fn into_plain(self) -> String {
        match self {
            Extraction::NoNotices => NO_NOTICES.to_string(),
            Extraction::Found(notices) => notices.join(NOTICE_SEPARATOR),
        }
    }
}

/// Pulls notice text out of a notices page.
#[derive(Debug, Clone, Default)]
pub struct NoticeExtractor {
    boundary: SectionBoundary,
}

impl NoticeExtractor {
    pub fn new(boundary: SectionBoundary) -> Self {
        Self { boundary }
    }

    /// Extract the plain text of every notice section.
    pub fn extract(&self, markup: &str) -> Extraction {
        let notices: Vec<String> = self
            .boundary
            .sections(markup)
            .into_iter()
            .map(|section| strip_tags(section).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        if notices.is_empty() {
            Extraction::NoNotices
        } else {
            Extraction::Found(notices)
        }
    }

    /// Extract and join into a single display text.
    pub fn extract_plain(&self, markup: &str) -> String {
        self.extract(markup).into_plain()
    }
}

/// Remove every markup tag, keeping text and whitespace.
///
/// A `<` with no closing `>` is not a tag and is kept as text.
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Stripped text never contains a complete tag.
        #[test]
        fn no_tags_survive(s in "[a-z <>/=\"]{0,200}") {
            let stripped = strip_tags(&s);
            prop_assert!(!TAG.is_match(&stripped));
        }

        /// Text without angle brackets is untouched.
        #[test]
        fn plain_text_is_unchanged(s in "[A-Z0-9 /\n]{0,200}") {
            prop_assert_eq!(strip_tags(&s), s);
        }

        /// Every well-formed section comes back, in order.
        #[test]
        fn wellformed_sections_all_found(bodies in proptest::collection::vec("[A-Z0-9 ]{1,30}", 1..8)) {
            let markup: String = bodies
                .iter()
                .enumerate()
                .map(|(i, b)| format!("<p>x</p><section id=\"notam-{i}\"><p>{b}</p></section>"))
                .collect();
            let expected: Vec<String> = bodies
                .iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
            let extraction = NoticeExtractor::default().extract(&markup);
            if expected.is_empty() {
                prop_assert_eq!(extraction, Extraction::NoNotices);
            } else {
                prop_assert_eq!(extraction, Extraction::Found(expected));
            }
        }
    }
}
