//! Diacritic-insensitive search for Slovak and Czech text.
//!
//! A query such as `prerov` is turned into a pattern that accepts every
//! diacritic variant of its letters, so it finds `Přerov`, `Prerov` or
//! `PŘEROV`. Queries with diacritics are stripped first, so `Košice` finds
//! `Kosice` as well.
//!
//! # Example
//!
//! ```rust
//! use diakritik::{CaseSensitivity, DiacriticMap, build_pattern, search, search_multi_word};
//!
//! let map = DiacriticMap::slovak();
//! assert_eq!(build_pattern("Košice", map), "K[o,ó,ô][s,š][i,í][c,č][e,é]");
//! assert!(search("Vlak do Kôsíc", "kosic", map, CaseSensitivity::Insensitive)?);
//!
//! // Words must appear in order, anything may separate them.
//! let text = "Chcem navštíviť hlavné mesto Slovenska, Bratislavu.";
//! let map = DiacriticMap::slovak_czech();
//! assert!(search_multi_word(text, "hlavne mesto slovenska", map, CaseSensitivity::Insensitive)?);
//! assert!(!search_multi_word(text, "slovenska hlavne", map, CaseSensitivity::Insensitive)?);
//! # Ok::<(), diakritik::SearchError>(())
//! ```

mod diacritic_map;
mod normalize;
pub mod pattern;
mod search;

pub use diacritic_map::{DiacriticMap, MapError};
pub use normalize::normalize_diacritics;
pub use pattern::{build_pattern, escape_literal};
pub use search::{CaseSensitivity, CompiledQuery, SearchError, search, search_multi_word};
