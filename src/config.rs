//! Configuration for envstore
//!
//! Describes how to assemble an environment for a child process.

use std::path::PathBuf;

use crate::environ::Environ;
use crate::error::{EnvError, Result};
use crate::source;

/// Recipe for building an [`Environ`]
///
/// Steps run in a fixed order by [`Config::materialize`]:
/// 1. host environment (when `inherit_os`)
/// 2. env files, later files overriding earlier ones
/// 3. `set`, then `unset`
/// 4. `keep` (only when patterns were given), then `drop`
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Sources
    // -------------------------------------------------------------------------
    /// Start from the current process environment
    pub inherit_os: bool,

    /// `.env` style files layered on top
    pub env_files: Vec<PathBuf>,

    // -------------------------------------------------------------------------
    // Edits
    // -------------------------------------------------------------------------
    /// Variables to set, applied in order
    pub set: Vec<(String, String)>,

    /// Variables to remove
    pub unset: Vec<String>,

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------
    /// Keys to keep (anchored regular expressions)
    pub keep: Vec<String>,

    /// Keys to drop (anchored regular expressions)
    pub drop: Vec<String>,

    /// Fail when a keep/drop pattern matches nothing
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inherit_os: true,
            env_files: Vec::new(),
            set: Vec::new(),
            unset: Vec::new(),
            keep: Vec::new(),
            drop: Vec::new(),
            strict: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build the environment this config describes.
    pub fn materialize(&self) -> Result<Environ> {
        let environ = if self.inherit_os {
            source::from_os()
        } else {
            Environ::default()
        };

        for path in &self.env_files {
            for (key, value) in source::from_env_file(path)?.as_map() {
                environ.set(key, value);
            }
        }

        for (key, value) in &self.set {
            environ.set(key.as_str(), value.as_str());
        }
        for key in &self.unset {
            environ.unset(key);
        }

        let mut missing = Vec::new();
        if !self.keep.is_empty() {
            missing.extend(environ.keep(&self.keep)?);
        }
        if !self.drop.is_empty() {
            missing.extend(environ.drop(&self.drop)?);
        }

        if !missing.is_empty() {
            tracing::warn!(patterns = ?missing, "patterns matched no variables");
            if self.strict {
                return Err(EnvError::MissingPatterns(missing));
            }
        }

        tracing::debug!(vars = environ.len(), "environment materialized");
        Ok(environ)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the current process environment (default: true)
    pub fn inherit_os(mut self, inherit: bool) -> Self {
        self.config.inherit_os = inherit;
        self
    }

    /// Layer an env file on top
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.env_files.push(path.into());
        self
    }

    /// Set a variable
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.set.push((key.into(), value.into()));
        self
    }

    /// Remove a variable
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.config.unset.push(key.into());
        self
    }

    /// Add a keep pattern
    pub fn keep(mut self, pattern: impl Into<String>) -> Self {
        self.config.keep.push(pattern.into());
        self
    }

    /// Add a drop pattern
    pub fn drop(mut self, pattern: impl Into<String>) -> Self {
        self.config.drop.push(pattern.into());
        self
    }

    /// Fail on patterns that match nothing
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Finish building the config
    pub fn build(self) -> Config {
        self.config
    }
}
