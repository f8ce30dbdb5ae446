//! Environment sources
//!
//! Ways to obtain the initial `key=value` lines for an [`Environ`].

use std::fs;
use std::path::Path;

use crate::environ::Environ;
use crate::error::{EnvError, Result};

/// Capture the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn from_os() -> Environ {
    let mut skipped = 0usize;
    let lines: Vec<String> = std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some(format!("{key}={value}")),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, "skipped non UTF-8 environment variables");
    }

    Environ::new(lines)
}

/// Read a `.env` style file: one `key=value` per line, `#` comments and blank
/// lines ignored.
pub fn from_env_file(path: impl AsRef<Path>) -> Result<Environ> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| EnvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let environ = Environ::new(contents.lines());
    tracing::debug!(path = %path.display(), vars = environ.len(), "loaded env file");
    Ok(environ)
}
