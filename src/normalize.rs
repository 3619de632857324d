//! Diacritic stripping.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

/// The Combining Diacritical Marks block emitted by canonical decomposition
/// of Latin letters (acute, caron, ring, diaeresis, circumflex, ...).
const COMBINING_MARKS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Strip diacritics from `text`, leaving the base letters.
///
/// The text is put through canonical decomposition (NFD), which splits a
/// composed letter such as `š` into `s` followed by U+030C, and every
/// combining mark in [`COMBINING_MARKS`] is then dropped.
///
/// ```
/// assert_eq!(diakritik::normalize_diacritics("Košice"), "Kosice");
/// ```
pub fn normalize_diacritics(text: &str) -> String {
    text.nfd().filter(|ch| !COMBINING_MARKS.contains(ch)).collect()
}
