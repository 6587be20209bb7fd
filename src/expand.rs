//! `$NAME` / `${NAME}` substitution.

use crate::lookup::Lookup;
use crate::scanner::Scanner;

/// Whether `byte` may appear in a variable name.
#[must_use]
pub const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Expand the variable whose `$` marker the scanner was just on.
///
/// Collects name bytes, dropping any `{` or `}` on the way (braces are
/// not checked for balance). The first other byte ends the name and is
/// left for the caller: the scanner is stepped back so the caller's next
/// `advance` lands on it. Unset names expand to an empty string.
pub fn expand(scanner: &mut Scanner<'_>, lookup: &(impl Lookup + ?Sized)) -> String {
    let mut name = String::new();

    while scanner.advance() {
        let Some(byte) = scanner.current() else {
            break;
        };
        match byte {
            b'{' | b'}' => {}
            b if is_name_byte(b) => name.push(char::from(b)),
            _ => {
                scanner.retreat();
                break;
            }
        }
    }

    lookup.lookup(&name).unwrap_or_default()
}
