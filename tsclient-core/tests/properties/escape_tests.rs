//! Property-based tests for argument escaping

use proptest::prelude::*;
use tsclient_core::escape::{escape, unescape};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Unescaping reverses escaping
    #[test]
    fn escape_is_reversible(value in any::<String>()) {
        prop_assert_eq!(unescape(&escape(&value)), value);
    }

    /// Escaped text contains no control characters
    #[test]
    fn escaped_text_has_no_controls(value in any::<String>()) {
        let escaped = escape(&value);
        prop_assert!(!escaped.chars().any(|c| c.is_ascii_control()));
    }

    /// Plain printable ASCII without quotes or backslashes is left alone
    #[test]
    fn plain_text_unchanged(value in "[a-zA-Z0-9 .:/_-]{0,40}") {
        prop_assert_eq!(escape(&value), value);
    }

    /// Non-ASCII characters pass through unchanged
    #[test]
    fn non_ascii_passes_through(value in "[\u{80}-\u{10FFFF}]{0,20}") {
        prop_assert_eq!(escape(&value), value);
    }
}
