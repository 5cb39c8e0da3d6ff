//! Abbreviation substitution for notice text.
//!
//! Not a translation in any linguistic sense: a fixed dictionary of NOTAM
//! abbreviations is swapped for Korean terms, everything else is left alone.

use std::collections::BTreeMap;

use regex::{Captures, Regex};

/// The default abbreviation dictionary.
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("RUNWAY", "활주로"),
    ("RWY", "활주로"),
    ("TWY", "유도로"),
    ("CLSD", "폐쇄"),
    ("ACFT", "항공기"),
    ("APN", "계류장"),
    ("OBST", "장애물"),
    ("WIP", "공사"),
];

/// A finite abbreviation → replacement mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// An empty dictionary; translating with it is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    ///
    /// Keys may contain any characters. A word boundary is required only on
    /// the sides of a key that begin or end with a word character, so
    /// `RWY.` still matches at the end of a line.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up the replacement for an abbreviation.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}

/// Replaces dictionary abbreviations in free text.
///
/// Matching is case-sensitive and whole-token: `RWY` is replaced in
/// `RWY 33` but not in `RWYS` or `XRWY`. The text is scanned once, left to
/// right. At each position the longest key wins, so a composite key is
/// never shadowed by a shorter key embedded in it; keys of equal length
/// cannot both match at one position.
#[derive(Debug, Clone)]
pub struct TokenTranslator {
    dictionary: Dictionary,
    pattern: Option<Regex>,
}

impl TokenTranslator {
    /// Build a translator for a dictionary.
    pub fn new(dictionary: Dictionary) -> Self {
        let pattern = build_pattern(&dictionary);
        Self {
            dictionary,
            pattern,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Replace every dictionary token in `text`.
    pub fn translate(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let token = &caps[0];
                self.dictionary.get(token).unwrap_or(token).to_string()
            })
            .into_owned()
    }
}

impl Default for TokenTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRIES.iter().copied().collect())
    }
}

/// Compile the dictionary keys into a single alternation.
///
/// The regex engine prefers earlier alternatives at the same start, so keys
/// are ordered longest first, then lexicographically for a stable pattern.
fn build_pattern(dictionary: &Dictionary) -> Option<Regex> {
    let mut keys: Vec<&str> = dictionary
        .iter()
        .map(|(k, _)| k)
        .filter(|k| !k.is_empty())
        .collect();
    if keys.is_empty() {
        return None;
    }
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = keys
        .iter()
        .map(|k| token_pattern(k))
        .collect::<Vec<_>>()
        .join("|");

    // Escaped literals always form a valid pattern.
    Regex::new(&alternation).ok()
}

/// One key as a whole-token pattern.
///
/// `\b` next to a non-word character would demand a word character on the
/// other side, so it is only added where the key has a word character.
fn token_pattern(key: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if key.starts_with(is_word) { r"\b" } else { "" };
    let trail = if key.ends_with(is_word) { r"\b" } else { "" };
    format!("{lead}{}{trail}", regex::escape(key))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Words that are never dictionary keys.
    fn plain_word() -> impl Strategy<Value = String> {
        "[A-Z0-9]{1,8}".prop_filter("not a key", |w| {
            !DEFAULT_ENTRIES.iter().any(|(k, _)| *k == w.as_str())
        })
    }

    /// Either a key or a plain word.
    fn word() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(DEFAULT_ENTRIES).prop_map(|(k, _)| k.to_string()),
            plain_word(),
        ]
    }

    proptest! {
        /// Text with no dictionary tokens passes through unchanged.
        #[test]
        fn identity_without_tokens(words in proptest::collection::vec(plain_word(), 0..20)) {
            let text = words.join(" ");
            prop_assert_eq!(TokenTranslator::default().translate(&text), text);
        }

        /// Values never contain keys, so a second pass changes nothing.
        #[test]
        fn idempotent(words in proptest::collection::vec(word(), 0..20)) {
            let translator = TokenTranslator::default();
            let once = translator.translate(&words.join(" "));
            prop_assert_eq!(translator.translate(&once), once.clone());
        }
    }
}
