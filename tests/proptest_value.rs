//! Property-based tests for the value decoder.

mod common;

use dotenv_shells::{
    Basic, DecodeOptions, Entry, Loader, Unset, decode_value, decode_value_with, format,
};
use proptest::prelude::*;

/// Text without quotes, escapes, comment or substitution markers.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \t.,:/@%+=_-]{0,40}".prop_map(|s| s)
}

/// Text to put between quotes of kind `quote`: never that quote, a
/// backslash, `$` or `#`.
fn quotable(quote: char) -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:/@%+=_'\"-]{0,30}".prop_map(move |s| s.replace(quote, ""))
}

/// Like `quotable`, with `#` after whitespace allowed.
fn quotable_with_hashes(quote: char) -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 #.,:/_'\"-]{0,30}".prop_map(move |s| s.replace(quote, ""))
}

/// Any printable ASCII, trimmed so it can round-trip.
fn any_value() -> impl Strategy<Value = String> {
    "[ -~]{0,40}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #[test]
    fn plain_values_are_only_trimmed(v in plain_text()) {
        prop_assert_eq!(decode_value(&v, &Unset), v.trim());
    }

    #[test]
    fn decoding_plain_values_is_idempotent(v in plain_text()) {
        let once = decode_value(&v, &Unset);
        prop_assert_eq!(decode_value(&once, &Unset), once.clone());
    }

    #[test]
    fn single_quotes_are_stripped(x in quotable('\'')) {
        prop_assert_eq!(decode_value(&format!("'{x}'"), &Unset), x.trim());
    }

    #[test]
    fn double_quotes_are_stripped(x in quotable('"')) {
        prop_assert_eq!(decode_value(&format!("\"{x}\""), &Unset), x.trim());
    }

    #[test]
    fn quote_aware_comments_keep_quoted_hashes(x in quotable_with_hashes('"')) {
        let raw = format!("\"{x}\" # trailing");
        let decoded = decode_value_with(&raw, &Unset, DecodeOptions::quote_aware());
        prop_assert_eq!(decoded, x.trim());
    }

    #[test]
    fn escaped_text_decodes_to_itself(v in any_value()) {
        let text = format(&[Entry::new("K", v.clone())]);
        let vars = Loader::new()
            .read_str_with(&Basic::new(Unset), &text)
            .expect("read formatted");
        prop_assert_eq!(vars.get("K"), Some(v.as_str()));
    }
}

#[test]
fn unset_variable_expands_to_nothing() {
    assert_eq!(decode_value("$MISSING", &Unset), "");
    assert_eq!(decode_value("$MISSING", &common::vars(&[])), "");
}
