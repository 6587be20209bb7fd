//! Env-file loading with pluggable shell syntax.
//!
//! Decodes the `KEY=VALUE` lines of `.env` files. Values follow a useful
//! subset of POSIX shell rules (quoting, `\` escapes, `#` comments and
//! `$NAME` substitution) without spawning a process. Decoders implement
//! the small [`Shell`] contract, so the built-in [`Basic`] decoder can be
//! swapped for [`Bash`], which delegates to a real interpreter, or for
//! your own.
//!
//! # Quick start
//!
//! ## Decode a single value
//!
//! ```
//! use std::collections::HashMap;
//! use dotenv_shells::decode_value;
//!
//! let vars = HashMap::from([("HOME".to_string(), "/home/me".to_string())]);
//! assert_eq!(decode_value("\"${HOME}\"/bin # comment", &vars), "/home/me/bin");
//! assert_eq!(decode_value("'$HOME'", &vars), "$HOME");
//! ```
//!
//! ## Decode a file
//!
//! ```
//! use dotenv_shells::{Basic, Loader, Unset};
//!
//! let content = "# settings\nexport PORT=8080\nNAME='my app' # quoted\n";
//! let vars = Loader::new().read_str_with(&Basic::new(Unset), content).unwrap();
//! assert_eq!(vars.get("PORT"), Some("8080"));
//! assert_eq!(vars.get("NAME"), Some("my app"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod bash;
pub mod expand;
pub mod formatter;
pub mod key;
pub mod loader;
pub mod lookup;
pub mod scanner;
pub mod shell;
pub mod value;

use std::io;
use std::path::PathBuf;

pub use bash::Bash;
pub use expand::expand;
pub use formatter::{format, format_exports};
pub use key::decode_key;
pub use loader::{CommitMode, DEFAULT_PATH, Dotenv, Entry, ErrorPolicy, Loader};
pub use lookup::{Lookup, ProcessEnv, Unset};
pub use scanner::Scanner;
pub use shell::{Basic, ParseError, ParseErrorKind, Shell, ShellKind, UnknownShell};
pub use value::{DecodeOptions, decode_value, decode_value_with};

/// Error returned by the file-level operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The env file could not be opened.
    #[error("cannot open env file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    /// The env file could not be read to the end.
    #[error("cannot read env file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    /// A line could not be decoded.
    #[error("cannot parse line {line}: {source}")]
    Parse { line: usize, source: ParseError },
    /// A decoded pair cannot be stored in the process environment.
    #[error("cannot set variable {key:?}: {reason}")]
    InvalidVariable { key: String, reason: &'static str },
}

/// Decode [`DEFAULT_PATH`] with [`Basic`] over the process environment.
pub fn read() -> Result<Dotenv, Error> {
    Loader::new().read_with(&Basic::new(ProcessEnv))
}

/// Decode [`DEFAULT_PATH`] with [`Basic`] and write the variables into
/// the process environment.
///
/// # Safety
///
/// Mutates the process environment; see [`Loader::load_with`].
pub unsafe fn load() -> Result<Dotenv, Error> {
    // SAFETY: forwarded to the caller.
    unsafe { Loader::new().load_with(&Basic::new(ProcessEnv)) }
}
