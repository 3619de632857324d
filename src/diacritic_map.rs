//! Diacritic tables: base letter to variant-class fragment.
//!
//! | Letter | Slovak      | Czech       | Slovak + Czech |
//! |--------|-------------|-------------|----------------|
//! | `a`    | `[a,á,ä]`   | `[a,á]`     | `[a,á,ä]`      |
//! | `e`    | `[e,é]`     | `[e,é,ě]`   | `[e,é,ě]`      |
//! | `i`    | `[i,í]`     | `[i,í]`     | `[i,í]`        |
//! | `o`    | `[o,ó,ô]`   | `[o,ó]`     | `[o,ó,ô]`      |
//! | `u`    | `[u,ú]`     | `[u,ú]`     | `[u,ú]`        |
//! | `y`    | `[y,ý]`     | `[y,ý]`     | `[y,ý]`        |
//! | `l`    | `[l,ľ,ĺ]`   |             | `[l,ľ,ĺ]`      |
//! | `r`    | `[r,ŕ]`     | `[r,ř]`     | `[r,ŕ,ř]`      |
//! | `c`    | `[c,č]`     | `[c,č]`     | `[c,č]`        |
//! | `d`    | `[d,ď]`     | `[d,ď]`     | `[d,ď]`        |
//! | `n`    | `[n,ň]`     | `[n,ň]`     | `[n,ň]`        |
//! | `s`    | `[s,š]`     | `[s,š]`     | `[s,š]`        |
//! | `t`    | `[t,ť]`     | `[t,ť]`     | `[t,ť]`        |
//! | `z`    | `[z,ž]`     | `[z,ž]`     | `[z,ž]`        |
//!
//! Fragments are spliced into built patterns without escaping, so a custom
//! table is validated when it is constructed.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::LazyLock;

use phf::{Map, phf_map};
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static SLOVAK_TABLE: Map<char, &'static str> = phf_map! {
    'a' => "[a,á,ä]",
    'c' => "[c,č]",
    'd' => "[d,ď]",
    'e' => "[e,é]",
    'i' => "[i,í]",
    'l' => "[l,ľ,ĺ]",
    'n' => "[n,ň]",
    'o' => "[o,ó,ô]",
    'r' => "[r,ŕ]",
    's' => "[s,š]",
    't' => "[t,ť]",
    'u' => "[u,ú]",
    'y' => "[y,ý]",
    'z' => "[z,ž]",
};

static CZECH_TABLE: Map<char, &'static str> = phf_map! {
    'a' => "[a,á]",
    'c' => "[c,č]",
    'd' => "[d,ď]",
    'e' => "[e,é,ě]",
    'i' => "[i,í]",
    'n' => "[n,ň]",
    'o' => "[o,ó]",
    'r' => "[r,ř]",
    's' => "[s,š]",
    't' => "[t,ť]",
    'u' => "[u,ú]",
    'y' => "[y,ý]",
    'z' => "[z,ž]",
};

static SLOVAK_CZECH_TABLE: Map<char, &'static str> = phf_map! {
    'a' => "[a,á,ä]",
    'c' => "[c,č]",
    'd' => "[d,ď]",
    'e' => "[e,é,ě]",
    'i' => "[i,í]",
    'l' => "[l,ľ,ĺ]",
    'n' => "[n,ň]",
    'o' => "[o,ó,ô]",
    'r' => "[r,ŕ,ř]",
    's' => "[s,š]",
    't' => "[t,ť]",
    'u' => "[u,ú]",
    'y' => "[y,ý]",
    'z' => "[z,ž]",
};

static SLOVAK: LazyLock<DiacriticMap> = LazyLock::new(|| DiacriticMap::from_table(&SLOVAK_TABLE));
static CZECH: LazyLock<DiacriticMap> = LazyLock::new(|| DiacriticMap::from_table(&CZECH_TABLE));
static SLOVAK_CZECH: LazyLock<DiacriticMap> =
    LazyLock::new(|| DiacriticMap::from_table(&SLOVAK_CZECH_TABLE));

/// Sentinels placed around a fragment to check that it stays one atom when
/// spliced between other pattern text.
const OPEN_SENTINEL: char = '\u{1}';
const CLOSE_SENTINEL: char = '\u{2}';

/// Errors raised while building a [`DiacriticMap`].
#[derive(Debug, Error)]
pub enum MapError {
    #[error("table key {key:?} is not a single lowercase letter")]
    InvalidKey { key: String },
    #[error("table key {key:?} is defined more than once")]
    DuplicateKey { key: char },
    #[error("fragment for {key:?} is empty")]
    EmptyFragment { key: char },
    #[error("fragment {fragment:?} for {key:?} is not a valid pattern: {source}")]
    InvalidFragment {
        key: char,
        fragment: String,
        #[source]
        source: regex::Error,
    },
    #[error("fragment {fragment:?} does not match its own base letter {key:?}")]
    FragmentRejectsBase { key: char, fragment: String },
    #[error("fragment {fragment:?} for {key:?} does not form a single atom (top-level alternation?)")]
    FragmentNotSelfContained { key: char, fragment: String },
    #[error("failed to parse diacritic table: {0}")]
    Toml(#[from] toml::de::Error),
}

/// On-disk shape of a custom table.
///
/// ```toml
/// [letters]
/// a = "[a,á,ä]"
/// o = "[o,ó,ô]"
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    letters: BTreeMap<String, String>,
}

/// An immutable mapping from a lowercase base letter to a pattern fragment
/// that accepts the letter and its diacritic variants.
#[derive(Debug, Clone)]
pub struct DiacriticMap {
    entries: BTreeMap<char, Cow<'static, str>>,
}

impl DiacriticMap {
    /// Slovak letters: `á ä é í ó ô ú ý ľ ĺ ŕ č ď ň š ť ž`.
    pub fn slovak() -> &'static DiacriticMap {
        &SLOVAK
    }

    /// Czech letters: `á é ě í ó ú ý č ď ň ř š ť ž`.
    pub fn czech() -> &'static DiacriticMap {
        &CZECH
    }

    /// The union of [`DiacriticMap::slovak`] and [`DiacriticMap::czech`].
    pub fn slovak_czech() -> &'static DiacriticMap {
        &SLOVAK_CZECH
    }

    /// Build a custom table, validating every entry.
    ///
    /// Keys must be single lowercase letters. Each fragment must compile on
    /// its own, match its base letter, and behave as a single atom so it can
    /// be spliced into a larger pattern unescaped.
    pub fn new<I, S>(entries: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, fragment) in entries {
            let fragment = fragment.into();
            validate_entry(key, &fragment)?;
            match map.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(Cow::Owned(fragment));
                }
                Entry::Occupied(_) => return Err(MapError::DuplicateKey { key }),
            }
        }
        Ok(Self { entries: map })
    }

    /// Parse and validate a table from its TOML form.
    pub fn from_toml_str(source: &str) -> Result<Self, MapError> {
        let document: TableDocument = toml::from_str(source)?;
        let mut entries = Vec::with_capacity(document.letters.len());
        for (key, fragment) in document.letters {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => entries.push((ch, fragment)),
                _ => return Err(MapError::InvalidKey { key }),
            }
        }
        Self::new(entries)
    }

    fn from_table(table: &'static Map<char, &'static str>) -> Self {
        Self {
            entries: table
                .entries()
                .map(|(&key, &fragment)| (key, Cow::Borrowed(fragment)))
                .collect(),
        }
    }

    /// Fragment for `ch`, looked up by its lowercase form.
    pub fn get(&self, ch: char) -> Option<&str> {
        let mut lower = ch.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(key), None) => self.entries.get(&key).map(AsRef::as_ref),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(&key, fragment)| (key, fragment.as_ref()))
    }
}

fn validate_entry(key: char, fragment: &str) -> Result<(), MapError> {
    if !(key.is_alphabetic() && key.is_lowercase()) {
        return Err(MapError::InvalidKey {
            key: key.to_string(),
        });
    }
    if fragment.is_empty() {
        return Err(MapError::EmptyFragment { key });
    }
    let invalid = |source: regex::Error| MapError::InvalidFragment {
        key,
        fragment: fragment.to_string(),
        source,
    };

    let grouped = Regex::new(&format!("^(?:{fragment})$")).map_err(invalid)?;
    if !grouped.is_match(&key.to_string()) {
        return Err(MapError::FragmentRejectsBase {
            key,
            fragment: fragment.to_string(),
        });
    }

    // Unwrapped, between sentinels, the fragment must still need both of
    // them. `a|b` would let `^\x01a` match on its own.
    let spliced =
        Regex::new(&format!("^{OPEN_SENTINEL}{fragment}{CLOSE_SENTINEL}$")).map_err(invalid)?;
    let whole = format!("{OPEN_SENTINEL}{key}{CLOSE_SENTINEL}");
    let open_only = format!("{OPEN_SENTINEL}{key}");
    let close_only = format!("{key}{CLOSE_SENTINEL}");
    if !spliced.is_match(&whole) || spliced.is_match(&open_only) || spliced.is_match(&close_only)
    {
        return Err(MapError::FragmentNotSelfContained {
            key,
            fragment: fragment.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtins() -> [(&'static str, &'static DiacriticMap); 3] {
        [
            ("slovak", DiacriticMap::slovak()),
            ("czech", DiacriticMap::czech()),
            ("slovak_czech", DiacriticMap::slovak_czech()),
        ]
    }

    #[test]
    fn builtin_tables_pass_validation() {
        for (name, map) in builtins() {
            for (key, fragment) in map.iter() {
                assert!(
                    validate_entry(key, fragment).is_ok(),
                    "{name}: {key:?} => {fragment:?}"
                );
            }
        }
    }

    #[test]
    fn builtin_table_sizes() {
        assert_eq!(DiacriticMap::slovak().len(), 14);
        assert_eq!(DiacriticMap::czech().len(), 13);
        assert_eq!(DiacriticMap::slovak_czech().len(), 14);
    }

    #[test]
    fn czech_has_no_l_entry() {
        assert_eq!(DiacriticMap::czech().get('l'), None);
        assert_eq!(DiacriticMap::slovak().get('l'), Some("[l,ľ,ĺ]"));
    }

    #[test]
    fn merged_table_covers_both_languages() {
        let merged = DiacriticMap::slovak_czech();
        assert_eq!(merged.get('r'), Some("[r,ŕ,ř]"));
        assert_eq!(merged.get('e'), Some("[e,é,ě]"));
        assert_eq!(merged.get('a'), Some("[a,á,ä]"));
        assert_eq!(merged.get('o'), Some("[o,ó,ô]"));
    }

    #[test]
    fn u_class_has_no_ring() {
        for map in [DiacriticMap::czech(), DiacriticMap::slovak_czech()] {
            assert_eq!(map.get('u'), Some("[u,ú]"));
        }
    }

    #[test]
    fn lookup_lowercases() {
        let map = DiacriticMap::slovak();
        assert_eq!(map.get('S'), Some("[s,š]"));
        assert_eq!(map.get('x'), None);
        assert_eq!(map.get('.'), None);
    }

    #[test]
    fn iter_is_sorted() {
        let keys: Vec<char> = DiacriticMap::slovak().iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn custom_table() {
        let map = DiacriticMap::new([('a', "[aáà]"), ('o', "(?:o|ö|ő)")]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get('A'), Some("[aáà]"));
    }

    #[test]
    fn rejects_uppercase_key() {
        let err = DiacriticMap::new([('A', "[a,á]")]).unwrap_err();
        assert!(matches!(err, MapError::InvalidKey { key } if key == "A"));
    }

    #[test]
    fn rejects_non_letter_key() {
        assert!(matches!(
            DiacriticMap::new([('.', "[.]")]),
            Err(MapError::InvalidKey { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_key() {
        assert!(matches!(
            DiacriticMap::new([('a', "[a,á]"), ('a', "[a,ä]")]),
            Err(MapError::DuplicateKey { key: 'a' })
        ));
    }

    #[test]
    fn rejects_empty_fragment() {
        assert!(matches!(
            DiacriticMap::new([('a', "")]),
            Err(MapError::EmptyFragment { key: 'a' })
        ));
    }

    #[test]
    fn rejects_unbalanced_bracket() {
        let err = DiacriticMap::new([('a', "[a,á")]).unwrap_err();
        match err {
            MapError::InvalidFragment { key, fragment, .. } => {
                assert_eq!(key, 'a');
                assert_eq!(fragment, "[a,á");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unbalanced_group() {
        assert!(matches!(
            DiacriticMap::new([('a', "a)")]),
            Err(MapError::InvalidFragment { .. })
        ));
    }

    #[test]
    fn rejects_fragment_missing_base() {
        assert!(matches!(
            DiacriticMap::new([('a', "[á,ä]")]),
            Err(MapError::FragmentRejectsBase { key: 'a', .. })
        ));
    }

    #[test]
    fn rejects_top_level_alternation() {
        assert!(matches!(
            DiacriticMap::new([('a', "a|á")]),
            Err(MapError::FragmentNotSelfContained { key: 'a', .. })
        ));
    }

    #[test]
    fn error_message_names_key_and_fragment() {
        let err = DiacriticMap::new([('e', "[e,é")]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'e'"), "{message}");
        assert!(message.contains("[e,é"), "{message}");
    }

    #[test]
    fn toml_table() {
        let map = DiacriticMap::from_toml_str(
            r#"
            [letters]
            a = "[a,á,ä]"
            o = "[o,ó,ô]"
            "#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get('o'), Some("[o,ó,ô]"));
    }

    #[test]
    fn toml_rejects_multi_char_key() {
        let err = DiacriticMap::from_toml_str("[letters]\nab = \"[a,b]\"\n").unwrap_err();
        assert!(matches!(err, MapError::InvalidKey { key } if key == "ab"));
    }

    #[test]
    fn toml_syntax_error() {
        assert!(matches!(
            DiacriticMap::from_toml_str("[letters\n"),
            Err(MapError::Toml(_))
        ));
    }

    #[test]
    fn toml_validates_fragments() {
        assert!(matches!(
            DiacriticMap::from_toml_str("[letters]\nz = \"[z,ž\"\n"),
            Err(MapError::InvalidFragment { key: 'z', .. })
        ));
    }
}
