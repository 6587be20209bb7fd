//! Serializes decoded entries back into env-file text.
//!
//! Every byte the value decoder treats specially is backslash-escaped,
//! so decoding a formatted line with [`Basic`](crate::Basic) returns the
//! original value, in either comment mode. Two exceptions: leading and
//! trailing whitespace, which the decoder trims, and newlines, which
//! end the line in a file.

use crate::loader::Entry;

/// Format entries as `KEY=VALUE` lines.
#[must_use]
pub fn format<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    format_lines(entries, false)
}

/// Format entries as `export KEY=VALUE` lines, so the output can also
/// be sourced by a shell.
#[must_use]
pub fn format_exports<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    format_lines(entries, true)
}

fn format_lines<'a>(entries: impl IntoIterator<Item = &'a Entry>, export: bool) -> String {
    let mut out = String::new();
    for entry in entries {
        if export {
            out.push_str("export ");
        }
        out.push_str(&entry.key);
        out.push('=');
        out.push_str(&escape_value(&entry.value));
        out.push('\n');
    }
    out
}

/// Escape a value so it decodes back to itself.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '\'' | '"' | '#' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
