//! Environ implementation
//!
//! BTreeMap-based store behind a reader/writer lock.

use std::collections::BTreeMap;
use std::fmt;
use std::process::Command;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::Result;
use crate::filter::{matching_keys, Matches};
use crate::lock::{DefaultLock, RawRwLock, RwLock};

use super::parse::{parse_entries, render_entries};

/// A set of environment variables to hand to a child process
///
/// ## Concurrency Model
///
/// - **Reads** (`get`, `len`, `keys`, `as_map`, `as_slice`, serialization):
///   shared lock, many concurrent readers
/// - **Writes** (`set`, `unset`): exclusive lock
/// - **Filters** (`keep`, `drop`): snapshot under a shared lock, match with no
///   lock held, then swap the result in under a short exclusive lock.
///   Two racing filters resolve last-writer-wins.
pub struct Environ<R: RawRwLock = DefaultLock> {
    vars: RwLock<R, BTreeMap<String, String>>,
}

impl Environ {
    /// Create an Environ from `key=value` lines.
    ///
    /// Comments, blank lines, lines without `=` and lines with an empty key
    /// are skipped. Later duplicates win.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_lock(lines)
    }

    /// Deserialize from a JSON array of `key=value` strings.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let lines: Vec<String> = serde_json::from_slice(data)?;
        Ok(Self::new(lines))
    }
}

impl<R: RawRwLock> Environ<R> {
    /// Create an Environ guarded by a specific raw lock type.
    pub fn with_lock<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_map(parse_entries(lines))
    }

    fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(vars),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Value under `key`, or an empty string when absent.
    pub fn get(&self, key: &str) -> String {
        self.vars.read().get(key).cloned().unwrap_or_default()
    }

    /// Whether `key` is present (possibly with an empty value).
    pub fn contains(&self, key: &str) -> bool {
        self.vars.read().contains_key(key)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    /// Whether there are no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.read().is_empty()
    }

    /// All keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.vars.read().keys().cloned().collect()
    }

    /// An independent copy of the variables.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.vars.read().clone()
    }

    /// Every variable as `key=value`, sorted lexically.
    ///
    /// This is the form to pass to a child process.
    pub fn as_slice(&self) -> Vec<String> {
        render_entries(&self.vars.read())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Set `key` to `value`, replacing any previous value.
    ///
    /// An empty key is ignored.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.vars.write().insert(key, value.into());
    }

    /// Remove `key`. Absent keys are ignored.
    pub fn unset(&self, key: &str) {
        self.vars.write().remove(key);
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Keep the variables whose keys match any of `patterns`, dropping the
    /// rest.
    ///
    /// Patterns are regular expressions matched against the whole key.
    /// Returns the sorted patterns that matched nothing. If any pattern fails
    /// to compile the Environ is left untouched and the error names it.
    pub fn keep<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<String>> {
        let mut vars = self.as_map();
        let Matches { matched, missing } = matching_keys(&vars, patterns)?;

        let kept: BTreeMap<String, String> = matched
            .into_iter()
            .filter_map(|key| vars.remove_entry(&key))
            .collect();

        tracing::trace!(
            kept = kept.len(),
            dropped = vars.len(),
            missing = missing.len(),
            "keep applied"
        );

        *self.vars.write() = kept;
        Ok(missing)
    }

    /// Drop the variables whose keys match any of `patterns`, keeping the
    /// rest.
    ///
    /// Same pattern rules and error behavior as [`keep`](Self::keep).
    pub fn drop<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<String>> {
        let mut vars = self.as_map();
        let Matches { matched, missing } = matching_keys(&vars, patterns)?;

        for key in &matched {
            vars.remove(key);
        }

        tracing::trace!(
            dropped = matched.len(),
            kept = vars.len(),
            missing = missing.len(),
            "drop applied"
        );

        *self.vars.write() = vars;
        Ok(missing)
    }

    // =========================================================================
    // Serialization & hand-off
    // =========================================================================

    /// Serialize as a JSON array of sorted `key=value` strings.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Replace the contents with a JSON array of `key=value` strings.
    ///
    /// On error the current contents are kept.
    pub fn load_json(&mut self, data: &[u8]) -> Result<()> {
        let lines: Vec<String> = serde_json::from_slice(data)?;
        *self.vars.get_mut() = parse_entries(lines);
        Ok(())
    }

    /// Clear `command`'s environment and install this one instead.
    pub fn apply_to<'c>(&self, command: &'c mut Command) -> &'c mut Command {
        command.env_clear().envs(self.vars.read().iter())
    }
}

impl<R: RawRwLock> Clone for Environ<R> {
    fn clone(&self) -> Self {
        Self::from_map(self.as_map())
    }
}

impl<R: RawRwLock> Default for Environ<R> {
    fn default() -> Self {
        Self::from_map(BTreeMap::new())
    }
}

impl<R: RawRwLock> fmt::Debug for Environ<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.vars.read().iter()).finish()
    }
}

impl<R: RawRwLock, S: AsRef<str>> FromIterator<S> for Environ<R> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::with_lock(iter)
    }
}

impl<R: RawRwLock> Serialize for Environ<R> {
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> std::result::Result<Ser::Ok, Ser::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, R: RawRwLock> Deserialize<'de> for Environ<R> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let lines = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::with_lock(lines))
    }
}
