//! Build a diacritic-insensitive pattern from a plain query.

use tracing::debug;

use crate::diacritic_map::DiacriticMap;
use crate::normalize::normalize_diacritics;

use super::escape::escape_literal;

/// Turn `query` into a pattern that accepts any diacritic variant of its
/// base letters.
///
/// The query is stripped of diacritics and escaped, then every character
/// that is a table key (compared case-insensitively) is replaced by the
/// table's fragment for its lowercase form. Other characters, including the
/// escapes, are kept as they are. An empty query gives an empty pattern,
/// which matches everywhere; callers compiling it directly must handle that.
///
/// ```
/// use diakritik::{DiacriticMap, build_pattern};
///
/// let pattern = build_pattern("Město.txt", DiacriticMap::slovak_czech());
/// assert_eq!(pattern, r"M[e,é,ě][s,š][t,ť][o,ó,ô]\.[t,ť]x[t,ť]");
/// ```
pub fn build_pattern(query: &str, map: &DiacriticMap) -> String {
    if query.is_empty() {
        return String::new();
    }

    let skeleton = escape_literal(&normalize_diacritics(query));
    let mut pattern = String::with_capacity(skeleton.len() * 4);
    for ch in skeleton.chars() {
        match map.get(ch) {
            Some(fragment) => pattern.push_str(fragment),
            None => pattern.push(ch),
        }
    }

    debug!(query, pattern = %pattern, "built pattern");
    pattern
}
