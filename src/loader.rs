//! Reads env files line by line and collects the decoded variables.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::Error;
use crate::lookup::Lookup;
use crate::shell::Shell;

/// File read when no path is configured.
pub const DEFAULT_PATH: &str = ".env";

/// One decoded assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    /// 1-based line number in the source.
    pub line: usize,
}

impl Entry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line: 0,
        }
    }
}

/// Decoded variables in file order.
///
/// A key may appear more than once; lookups see the last definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dotenv {
    entries: Vec<Entry>,
}

impl Dotenv {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Value of the last definition of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapse into a map, later definitions overriding earlier ones.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Dotenv {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Entry> for Dotenv {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl Lookup for Dotenv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// What to do with a line the shell cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log a warning and continue with the next line.
    Skip,
}

/// When [`Loader::load_with`] writes to the process environment.
///
/// This decides whether a substitution resolving through the process
/// environment can see a variable defined earlier in the same file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitMode {
    /// Decode and validate the whole file, then commit. Earlier lines
    /// are invisible to later substitutions.
    #[default]
    Batch,
    /// Commit each entry as soon as it is decoded. Later lines see
    /// earlier ones.
    PerLine,
}

/// Builder-style driver over one env file.
///
/// ```no_run
/// use dotenv_shells::{Basic, ErrorPolicy, Loader, ProcessEnv};
///
/// let vars = Loader::new()
///     .path("config/app.env")
///     .on_error(ErrorPolicy::Skip)
///     .read_with(&Basic::new(ProcessEnv))?;
/// println!("{:?}", vars.get("DATABASE_URL"));
/// # Ok::<(), dotenv_shells::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    path: PathBuf,
    on_error: ErrorPolicy,
    commit: CommitMode,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Loader for [`DEFAULT_PATH`], aborting on errors, committing in
    /// one batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            on_error: ErrorPolicy::default(),
            commit: CommitMode::default(),
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub const fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    #[must_use]
    pub const fn commit(mut self, mode: CommitMode) -> Self {
        self.commit = mode;
        self
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.path
    }

    /// Decode the configured file without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Open` / `Error::Read` on I/O failure and
    /// `Error::Parse` for an undecodable line under
    /// [`ErrorPolicy::Abort`].
    pub fn read_with(&self, shell: &(impl Shell + ?Sized)) -> Result<Dotenv, Error> {
        let mut out = Dotenv::new();
        self.decode_file(shell, &mut out, false)?;
        Ok(out)
    }

    /// Decode in-memory env-file content.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for an undecodable line under
    /// [`ErrorPolicy::Abort`].
    pub fn read_str_with(
        &self,
        shell: &(impl Shell + ?Sized),
        content: &str,
    ) -> Result<Dotenv, Error> {
        let mut out = Dotenv::new();
        for (idx, line) in content.lines().enumerate() {
            self.decode_line(shell, line, idx + 1, &mut out, false)?;
        }
        Ok(out)
    }

    /// Decode the configured file and write every variable into the
    /// process environment, following the configured [`CommitMode`].
    ///
    /// Returns what was decoded. Under `CommitMode::Batch` nothing is
    /// written if decoding fails or any pair is rejected.
    ///
    /// # Errors
    ///
    /// Same as [`Loader::read_with`], plus `Error::InvalidVariable` for a
    /// pair the environment cannot hold.
    ///
    /// # Safety
    ///
    /// Mutates the process environment. No other thread may read or
    /// write the environment concurrently, see [`std::env::set_var`].
    pub unsafe fn load_with(&self, shell: &(impl Shell + ?Sized)) -> Result<Dotenv, Error> {
        let mut out = Dotenv::new();
        match self.commit {
            CommitMode::PerLine => self.decode_file(shell, &mut out, true)?,
            CommitMode::Batch => {
                self.decode_file(shell, &mut out, false)?;
                for entry in &out {
                    validate(&entry.key, &entry.value)?;
                }
                for entry in &out {
                    // SAFETY: validated above; forwarded to the caller.
                    unsafe { std::env::set_var(&entry.key, &entry.value) };
                }
            }
        }
        Ok(out)
    }

    fn decode_file(
        &self,
        shell: &(impl Shell + ?Sized),
        out: &mut Dotenv,
        commit_each: bool,
    ) -> Result<(), Error> {
        let file = File::open(&self.path).map_err(|source| Error::Open {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("reading {}", self.path.display());

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| Error::Read {
                path: self.path.clone(),
                source,
            })?;
            self.decode_line(shell, &line, idx + 1, out, commit_each)?;
        }
        Ok(())
    }

    fn decode_line(
        &self,
        shell: &(impl Shell + ?Sized),
        line: &str,
        number: usize,
        out: &mut Dotenv,
        commit_each: bool,
    ) -> Result<(), Error> {
        let line = line.trim();
        if line.is_empty() || shell.ignorable(line) {
            log::debug!("line {number}: skipped");
            return Ok(());
        }

        match shell.parse_line(line) {
            Ok((key, value)) => {
                log::debug!("line {number}: decoded {key}");
                let entry = Entry {
                    key,
                    value,
                    line: number,
                };
                if commit_each {
                    // SAFETY: only reached from `load_with`, whose caller
                    // upholds the environment contract.
                    unsafe { commit(&entry)? };
                }
                out.push(entry);
                Ok(())
            }
            Err(source) => match self.on_error {
                ErrorPolicy::Abort => Err(Error::Parse {
                    line: number,
                    source,
                }),
                ErrorPolicy::Skip => {
                    log::warn!("line {number}: {}, skipping", source.kind.summary());
                    Ok(())
                }
            },
        }
    }
}

/// Check that the environment can hold `key=value`.
///
/// # Errors
///
/// Returns `Error::InvalidVariable` for an empty key, a key containing
/// `=` or NUL, or a value containing NUL.
pub fn validate(key: &str, value: &str) -> Result<(), Error> {
    let reason = if key.is_empty() {
        "empty name"
    } else if key.contains('=') {
        "name contains '='"
    } else if key.contains('\0') {
        "name contains NUL"
    } else if value.contains('\0') {
        "value contains NUL"
    } else {
        return Ok(());
    };
    Err(Error::InvalidVariable {
        key: key.to_string(),
        reason,
    })
}

/// # Safety
///
/// See [`Loader::load_with`].
unsafe fn commit(entry: &Entry) -> Result<(), Error> {
    validate(&entry.key, &entry.value)?;
    // SAFETY: validated above; thread-safety is the caller's contract.
    unsafe { std::env::set_var(&entry.key, &entry.value) };
    Ok(())
}
