//! Decoder that lets a real bash interpret each line.
//!
//! Gives full bash fidelity (command substitution, arithmetic, ...) at
//! the cost of one process per line and a bash binary on the host.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::key::decode_key;
use crate::shell::{ParseError, ParseErrorKind, Shell, split_assignment};

/// Interpreter used when none is configured.
pub const DEFAULT_BASH: &str = "/bin/bash";

/// [`Shell`] that evaluates `echo -n <line>` in bash and splits the
/// output on the first `=`.
///
/// The line is interpolated into the command unescaped, so it runs with
/// the full power of the interpreter. Only use it on trusted files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bash {
    program: PathBuf,
}

impl Default for Bash {
    fn default() -> Self {
        Self::with_program(DEFAULT_BASH)
    }
}

impl Bash {
    /// Bash at [`DEFAULT_BASH`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bash at a custom path. Any interpreter accepting `-c` and a
    /// bash-compatible `echo -n` works.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Shell for Bash {
    fn parse_line(&self, line: &str) -> Result<(String, String), ParseError> {
        log::trace!("evaluating line with {}", self.program.display());

        let output = Command::new(&self.program)
            .arg("-c")
            .arg(format!("echo -n {line}"))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ParseError::new(ParseErrorKind::InterpreterLaunch(e.to_string()), line))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let mut combined = stdout.into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ParseError::new(
                ParseErrorKind::InterpreterFailed {
                    status: output.status.code(),
                    output: combined,
                },
                line,
            ));
        }

        let (key, value) = split_assignment(&stdout).map_err(|e| ParseError::new(e.kind, line))?;
        Ok((decode_key(key), value.to_string()))
    }
}
