#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::WishError;

// ***************************************************************************
//                                Constants
// ***************************************************************************
/// Longest accepted name, counted in code points after trimming.
pub const MAX_NAME_CHARS: usize = 36;

// Letters, numbers, punctuation, space separators, marks and the math,
// modifier and other symbol categories.  Control characters, line and
// paragraph separators, currency symbols and unassigned code points fail.
const NAME_PATTERN: &str = r"^[\p{L}\p{N}\p{P}\p{Zs}\p{M}\p{Sm}\p{So}\p{Sk}]+$";

lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(NAME_PATTERN)
        .unwrap_or_else(|e| panic!("Invalid name pattern {}: {}", NAME_PATTERN, e));
}

// ***************************************************************************
//                                 ValidName
// ***************************************************************************
/// A raw name that passed validation.  The original text, including any
/// surrounding whitespace, is kept unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidName(String);

impl ValidName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ValidName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// validate:
// ---------------------------------------------------------------------------
/** Check a raw name taken from the query string.  The length check runs first
 * on the trimmed text, then every code point of the untrimmed text must fall
 * into one of the allowed Unicode categories.
 */
pub fn validate(name: &str) -> Result<ValidName, WishError> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(WishError::Length(MAX_NAME_CHARS));
    }

    if !NAME_REGEX.is_match(name) {
        return Err(WishError::Charset);
    }

    Ok(ValidName(name.to_string()))
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names_unchanged() {
        for name in ["John Doe", "Mary-Jane", "O'Brien", "Zoë", "José María", "李小龙", "R2D2"] {
            let valid = validate(name).unwrap();
            assert_eq!(valid.as_str(), name);
        }
    }

    #[test]
    fn keeps_surrounding_spaces() {
        let valid = validate("  Ann  ").unwrap();
        assert_eq!(valid.as_str(), "  Ann  ");
    }

    #[test]
    fn accepts_symbols_and_marks() {
        // Sm, So, Sk and a combining mark.
        for name in ["a+b", "<script>", "★ Star ★", "a^b", "e\u{0301}"] {
            assert!(validate(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(validate(""), Err(WishError::Length(MAX_NAME_CHARS)));
        assert_eq!(validate("    "), Err(WishError::Length(MAX_NAME_CHARS)));
    }

    #[test]
    fn length_is_counted_in_code_points() {
        let name = "é".repeat(MAX_NAME_CHARS);
        assert!(validate(&name).is_ok());

        let name = "a".repeat(MAX_NAME_CHARS + 1);
        assert_eq!(validate(&name), Err(WishError::Length(MAX_NAME_CHARS)));
    }

    #[test]
    fn length_ignores_surrounding_whitespace() {
        let name = format!("  {}  ", "a".repeat(MAX_NAME_CHARS));
        assert!(validate(&name).is_ok());
    }

    #[test]
    fn rejects_disallowed_categories() {
        // Control, currency, line separator, private use.
        for name in ["tab\there", "new\nline", "cost $5", "a\u{2028}b", "x\u{E000}"] {
            assert_eq!(validate(name), Err(WishError::Charset), "{name:?} should be rejected");
        }
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            WishError::Length(MAX_NAME_CHARS).to_string(),
            "name length must be between 1 and 36 characters"
        );
        assert_eq!(WishError::Charset.to_string(), "name contains invalid characters");
    }
}
