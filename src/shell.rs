//! The line-decoding contract and its in-process implementation.
//!
//! A [`Shell`] is one family of value syntax: it decides which lines to
//! skip and turns the rest into a `(key, value)` pair. [`Basic`] decodes
//! in-process with a shell-like subset; [`Bash`](crate::Bash) hands the
//! line to a real interpreter. [`ShellKind`] picks one at runtime.

use std::fmt;
use std::str::FromStr;

use crate::bash::Bash;
use crate::key::decode_key;
use crate::lookup::{Lookup, ProcessEnv};
use crate::value::{DecodeOptions, decode_value_with};

/// Classifies a line decoding error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No `=` separator in the line.
    MalformedLine,
    /// The interpreter process could not be started.
    InterpreterLaunch(String),
    /// The interpreter exited unsuccessfully.
    InterpreterFailed {
        status: Option<i32>,
        output: String,
    },
}

impl ParseErrorKind {
    /// Like `Display`, minus any interpreter output. Output may echo
    /// values, so this is the form that goes to the log.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::InterpreterFailed {
                status: Some(code),
                ..
            } => format!("interpreter exited with status {code}"),
            Self::InterpreterFailed { status: None, .. } => {
                "interpreter terminated by signal".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine => write!(f, "missing '=' separator"),
            Self::InterpreterLaunch(msg) => {
                write!(f, "cannot launch interpreter: {msg}")
            }
            Self::InterpreterFailed {
                status: Some(code),
                output,
            } => {
                write!(f, "interpreter exited with status {code}: {}", output.trim())
            }
            Self::InterpreterFailed {
                status: None,
                output,
            } => {
                write!(f, "interpreter terminated by signal: {}", output.trim())
            }
        }
    }
}

/// Error produced while decoding a single line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in {line:?}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The offending line as passed to `parse_line`.
    pub line: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: &str) -> Self {
        Self {
            kind,
            line: line.to_string(),
        }
    }
}

/// Decodes the lines of an env file.
///
/// Lines are handed over already trimmed; blank lines never reach the
/// shell.
pub trait Shell {
    /// Whether the line should be skipped. Defaults to `#` comments.
    fn ignorable(&self, line: &str) -> bool {
        line.starts_with('#')
    }

    /// Split a line into its variable name and decoded value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when the line cannot be decoded.
    fn parse_line(&self, line: &str) -> Result<(String, String), ParseError>;
}

impl<S: Shell + ?Sized> Shell for &S {
    fn ignorable(&self, line: &str) -> bool {
        (**self).ignorable(line)
    }

    fn parse_line(&self, line: &str) -> Result<(String, String), ParseError> {
        (**self).parse_line(line)
    }
}

/// Split `line` on its first `=`.
///
/// # Errors
///
/// Returns a `MalformedLine` error when there is no `=`.
pub fn split_assignment(line: &str) -> Result<(&str, &str), ParseError> {
    line.split_once('=')
        .ok_or_else(|| ParseError::new(ParseErrorKind::MalformedLine, line))
}

/// In-process decoder for a portable subset of shell syntax.
///
/// Substitutions resolve through `L`, the process environment unless
/// another [`Lookup`] is supplied.
#[derive(Debug, Clone, Default)]
pub struct Basic<L = ProcessEnv> {
    lookup: L,
    options: DecodeOptions,
}

impl<L: Lookup> Basic<L> {
    /// Decoder resolving substitutions through `lookup`.
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self::with_options(lookup, DecodeOptions::default())
    }

    /// Decoder with explicit [`DecodeOptions`].
    #[must_use]
    pub const fn with_options(lookup: L, options: DecodeOptions) -> Self {
        Self { lookup, options }
    }

    #[must_use]
    pub const fn options(&self) -> DecodeOptions {
        self.options
    }

    #[must_use]
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }
}

impl<L: Lookup> Shell for Basic<L> {
    fn parse_line(&self, line: &str) -> Result<(String, String), ParseError> {
        let (key, value) = split_assignment(line)?;
        Ok((
            decode_key(key),
            decode_value_with(value, &self.lookup, self.options),
        ))
    }
}

/// Runtime choice between the built-in decoders.
#[derive(Debug, Clone)]
pub enum ShellKind {
    Basic(Basic),
    Bash(Bash),
}

impl Default for ShellKind {
    fn default() -> Self {
        Self::Basic(Basic::default())
    }
}

impl Shell for ShellKind {
    fn ignorable(&self, line: &str) -> bool {
        match self {
            Self::Basic(shell) => shell.ignorable(line),
            Self::Bash(shell) => shell.ignorable(line),
        }
    }

    fn parse_line(&self, line: &str) -> Result<(String, String), ParseError> {
        match self {
            Self::Basic(shell) => shell.parse_line(line),
            Self::Bash(shell) => shell.parse_line(line),
        }
    }
}

/// Error returned when a shell name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shell '{0}', expected 'basic' or 'bash'")]
pub struct UnknownShell(pub String);

impl FromStr for ShellKind {
    type Err = UnknownShell;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic(Basic::default())),
            "bash" => Ok(Self::Bash(Bash::default())),
            other => Err(UnknownShell(other.to_string())),
        }
    }
}
