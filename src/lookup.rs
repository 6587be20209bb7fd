//! Read-only variable lookup used during `$NAME` substitution.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Resolves a variable name to its value.
///
/// `None` means the variable is unset; it substitutes as an empty
/// string.
pub trait Lookup {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Lookup backed by the current process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        // `std::env::var` rejects these names anyway.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var(name).ok()
    }
}

/// Lookup that never resolves anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unset;

impl Lookup for Unset {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<L: Lookup + ?Sized> Lookup for Box<L> {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}
