//! Query to pattern translation.
//!
//! A query is reduced to its base letters, escaped, and each mapped letter is
//! replaced by the table's variant class:
//!
//! | Step        | `Město.txt` (Slovak + Czech table)              |
//! |-------------|-------------------------------------------------|
//! | normalize   | `Mesto.txt`                                     |
//! | escape      | `Mesto\.txt`                                    |
//! | substitute  | `M[e,é,ě][s,š][t,ť][o,ó,ô]\.[t,ť]x[t,ť]`        |
//!
//! The result is a pattern for the `regex` crate.

pub mod builder;
pub mod escape;

pub use builder::build_pattern;
pub use escape::escape_literal;
