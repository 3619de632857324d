//! Literal escaping for text embedded in a pattern.

/// Characters the regular-expression engine treats as operators outside a
/// character class.
fn is_meta(ch: char) -> bool {
    matches!(
        ch,
        '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
    )
}

/// Escape `text` so that it matches itself literally when used as a pattern.
///
/// Each metacharacter gets a `\` prefix; every other character, including
/// non-ASCII letters, is copied through. Escaping is not idempotent, so a
/// literal must be escaped exactly once.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_meta(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use regex::Regex;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_literal(""), "");
        assert_eq!(escape_literal("Žilina 2024"), "Žilina 2024");
    }

    #[test]
    fn every_metacharacter_is_escaped() {
        assert_eq!(
            escape_literal(r".*+?^${}()|[]\"),
            r"\.\*\+\?\^\$\{\}\(\)\|\[\]\\"
        );
    }

    #[test]
    fn file_name() {
        assert_eq!(escape_literal("file.txt"), r"file\.txt");
    }

    #[test]
    fn double_escaping_is_not_a_no_op() {
        let once = escape_literal("a.b");
        assert_eq!(escape_literal(&once), r"a\\\.b");
    }

    proptest! {
        #[test]
        fn text_without_metacharacters_is_unchanged(s in "[^.*+?^${}()|\\[\\]\\\\]*") {
            prop_assert_eq!(escape_literal(&s), s);
        }

        #[test]
        fn escaped_text_matches_itself(s in "\\PC{0,64}") {
            let re = Regex::new(&escape_literal(&s)).unwrap();
            prop_assert!(re.is_match(&s));
        }
    }
}
