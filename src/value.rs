//! Value decoder: the quoting, escaping, comment and substitution rules
//! applied to the right-hand side of an assignment.
//!
//! Rules, checked in order for every scanned byte:
//!
//! 1. `\` outside single quotes appends the next byte literally.
//! 2. `'` outside double quotes toggles single quoting.
//! 3. `"` outside single quotes toggles double quoting.
//! 4. `#` preceded by whitespace ends the value (see
//!    [`DecodeOptions::quote_aware_comments`]).
//! 5. `$` outside single quotes starts a substitution.
//! 6. Anything else is appended as is.
//!
//! The result is trimmed. Unterminated quotes, a trailing `\` and unset
//! variables are accepted silently.

use crate::expand::expand;
use crate::lookup::Lookup;
use crate::scanner::Scanner;

/// Knobs for [`decode_value_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Only start a comment outside quotes.
    ///
    /// Off by default: a `#` after whitespace truncates the value even
    /// inside quotes, so `'a #b'` decodes to `a`. Turning it on makes
    /// that decode to `a #b`.
    pub quote_aware_comments: bool,
}

impl DecodeOptions {
    /// Options with quote-aware comment detection enabled.
    #[must_use]
    pub const fn quote_aware() -> Self {
        Self {
            quote_aware_comments: true,
        }
    }
}

/// Decode a raw value with the default options.
#[must_use]
pub fn decode_value(raw: &str, lookup: &(impl Lookup + ?Sized)) -> String {
    decode_value_with(raw, lookup, DecodeOptions::default())
}

/// Decode a raw value.
#[must_use]
pub fn decode_value_with(
    raw: &str,
    lookup: &(impl Lookup + ?Sized),
    options: DecodeOptions,
) -> String {
    let mut out = Vec::with_capacity(raw.len());
    let mut single_quoted = false;
    let mut double_quoted = false;
    let mut scanner = Scanner::new(raw);

    while scanner.advance() {
        let Some(byte) = scanner.current() else {
            break;
        };

        match byte {
            b'\\' if !single_quoted => {
                scanner.advance();
                if let Some(next) = scanner.current() {
                    out.push(next);
                }
            }
            b'\'' if !double_quoted => single_quoted = !single_quoted,
            b'"' if !single_quoted => double_quoted = !double_quoted,
            b'#' if starts_comment(
                &scanner,
                options.quote_aware_comments && (single_quoted || double_quoted),
            ) =>
            {
                break;
            }
            b'$' if !single_quoted => {
                out.extend_from_slice(expand(&mut scanner, lookup).as_bytes());
            }
            _ => out.push(byte),
        }
    }

    String::from_utf8_lossy(&out).trim().to_string()
}

fn starts_comment(scanner: &Scanner<'_>, suppressed: bool) -> bool {
    !suppressed && scanner.previous().is_some_and(is_space)
}

/// ASCII whitespace including vertical tab.
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
