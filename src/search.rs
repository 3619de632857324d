//! Single-term and ordered multi-word search.

use std::ops::Range;

use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::{debug, trace};

use crate::diacritic_map::DiacriticMap;
use crate::pattern::build_pattern;

/// Gap placed between the words of a multi-word query: anything but a line
/// terminator (`\n`, `\r`, U+2028, U+2029), as little as possible. Word
/// distance is not bounded.
const WORD_GAP: &str = r"[^\n\r\x{2028}\x{2029}]*?";

/// Errors raised while compiling a built pattern.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to compile pattern {pattern:?}: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Whether a search distinguishes upper- and lowercase letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    #[default]
    Insensitive,
    Sensitive,
}

impl CaseSensitivity {
    pub fn is_insensitive(&self) -> bool {
        matches!(self, CaseSensitivity::Insensitive)
    }
}

impl From<bool> for CaseSensitivity {
    /// `true` means case-sensitive.
    fn from(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }
}

/// A query compiled once and tested against any number of texts.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    regex: Regex,
}

impl CompiledQuery {
    /// Compile a single-term query.
    ///
    /// Returns `None` when the query can never match, i.e. when it is empty
    /// or consists only of combining marks. [`search`] differs here: it
    /// tests the empty pattern a mark-only query builds, which matches any
    /// non-empty text.
    pub fn single(
        query: &str,
        map: &DiacriticMap,
        case: CaseSensitivity,
    ) -> Result<Option<Self>, SearchError> {
        let pattern = build_pattern(query, map);
        if pattern.is_empty() {
            return Ok(None);
        }
        Self::compile(pattern, case).map(Some)
    }

    /// Compile a multi-word query whose words must appear in order.
    ///
    /// The query is split on runs of whitespace. Returns `None` when no word
    /// yields a non-empty pattern; words that strip to nothing are dropped.
    /// [`search_multi_word`] keeps such words as empty terms instead.
    pub fn multi_word(
        query: &str,
        map: &DiacriticMap,
        case: CaseSensitivity,
    ) -> Result<Option<Self>, SearchError> {
        let words = word_patterns(query, map)
            .into_iter()
            .filter(|pattern| !pattern.is_empty())
            .collect_vec();
        if words.is_empty() {
            return Ok(None);
        }
        Self::compile(words.iter().join(WORD_GAP), case).map(Some)
    }

    fn compile(pattern: String, case: CaseSensitivity) -> Result<Self, SearchError> {
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(case.is_insensitive())
            .build()
            .map_err(|source| SearchError::Compile {
                pattern: pattern.clone(),
                source,
            })?;
        debug!(pattern = %pattern, ?case, "compiled query");
        Ok(Self { regex })
    }

    /// Whether the query occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        !text.is_empty() && self.regex.is_match(text)
    }

    /// Byte range of the leftmost match in `text`.
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        if text.is_empty() {
            return None;
        }
        self.regex.find(text).map(|m| m.range())
    }

    /// The pattern this query was compiled from.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// One built pattern per whitespace-separated word of `query`.
fn word_patterns(query: &str, map: &DiacriticMap) -> Vec<String> {
    let words = query
        .split_whitespace()
        .map(|word| build_pattern(word, map))
        .collect_vec();
    for (index, word) in words.iter().enumerate() {
        trace!(index, pattern = %word, "multi-word term");
    }
    words
}

/// Test whether `query` occurs in `text`, ignoring diacritics.
///
/// An empty `text` or `query` never matches. A query made only of
/// combining marks builds an empty pattern, which matches any other text.
///
/// ```
/// use diakritik::{CaseSensitivity, DiacriticMap, search};
///
/// let text = "Potřebuji zajít do Plzně na oběd, v Přerově.";
/// assert!(search(text, "prerov", DiacriticMap::czech(), CaseSensitivity::Insensitive)?);
/// # Ok::<(), diakritik::SearchError>(())
/// ```
pub fn search(
    text: &str,
    query: &str,
    map: &DiacriticMap,
    case: CaseSensitivity,
) -> Result<bool, SearchError> {
    if text.is_empty() || query.is_empty() {
        return Ok(false);
    }
    let compiled = CompiledQuery::compile(build_pattern(query, map), case)?;
    Ok(compiled.is_match(text))
}

/// Test whether the whitespace-separated words of `query` occur in `text`
/// in the given order, with anything (or nothing) between them.
///
/// An empty `text` or a query without words never matches.
pub fn search_multi_word(
    text: &str,
    query: &str,
    map: &DiacriticMap,
    case: CaseSensitivity,
) -> Result<bool, SearchError> {
    if text.is_empty() || query.is_empty() {
        return Ok(false);
    }
    let words = word_patterns(query, map);
    if words.is_empty() {
        return Ok(false);
    }
    let compiled = CompiledQuery::compile(words.iter().join(WORD_GAP), case)?;
    Ok(compiled.is_match(text))
}
