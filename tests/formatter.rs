//! Formatted output decodes back to the same variables.

mod common;

use dotenv_shells::{
    Basic, DecodeOptions, Dotenv, Entry, Loader, Unset, format, format_exports,
};

fn entries() -> Vec<Entry> {
    vec![
        Entry::new("PLAIN", "value"),
        Entry::new("SPACED", "two words"),
        Entry::new("HASHED", "a #b"),
        Entry::new("DOLLAR", "$HOME/${X}"),
        Entry::new("QUOTES", r#"it's "quoted""#),
        Entry::new("BACKSLASH", r"C:\temp\"),
        Entry::new("EMPTY", ""),
    ]
}

fn decoded(content: &str, options: DecodeOptions) -> Vec<(String, String)> {
    Loader::new()
        .read_str_with(&Basic::with_options(Unset, options), content)
        .expect("read formatted output")
        .iter()
        .map(|e| (e.key.clone(), e.value.clone()))
        .collect()
}

fn expected() -> Vec<(String, String)> {
    entries()
        .into_iter()
        .map(|e| (e.key, e.value))
        .collect()
}

#[test]
fn format_decodes_back() {
    let text = format(&entries());
    assert_eq!(decoded(&text, DecodeOptions::default()), expected());
    assert_eq!(decoded(&text, DecodeOptions::quote_aware()), expected());
}

#[test]
fn exports_decode_back() {
    let text = format_exports(&entries());
    assert!(text.lines().all(|l| l.starts_with("export ")));
    assert_eq!(decoded(&text, DecodeOptions::default()), expected());
}

#[test]
fn format_a_decoded_file() {
    let vars: Dotenv = Loader::new()
        .read_str_with(&common::basic(), "A='x # y'\nB=$HOME\n")
        .expect("read");
    assert_eq!(format(&vars), "A=x\nB=/home/me\n");
}

#[test]
fn whitespace_is_written_as_is() {
    let vars = vec![Entry::new("K", "a\tb #c")];
    let text = format(&vars);
    assert_eq!(text, "K=a\tb \\#c\n");
    assert_eq!(
        decoded(&text, DecodeOptions::default()),
        vec![("K".to_string(), "a\tb #c".to_string())]
    );
}
