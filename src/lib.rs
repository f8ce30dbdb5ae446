//! # envstore
//!
//! A thread-safe, in-memory environment variable store for building the
//! environment of a child process without touching the real one:
//! - Lenient `key=value` parsing (`.env` comments and blank lines allowed)
//! - Single-writer/multi-reader concurrency model
//! - Regex keep/drop filters anchored to whole keys
//! - Sorted, deterministic exports (list, map, JSON)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────┐
//! │  Host env / .env     │   │       Config         │
//! │      (source)        │──▶│ (set/unset/keep/drop)│
//! └──────────────────────┘   └──────────┬───────────┘
//!                                       │
//!                            ┌──────────▼───────────┐
//!                            │       Environ        │
//!                            │ (RwLock<BTreeMap>)   │
//!                            └──────────┬───────────┘
//!                                       │
//!              ┌────────────────────────┼──────────────────────┐
//!              ▼                        ▼                      ▼
//!       ┌─────────────┐         ┌─────────────┐        ┌─────────────┐
//!       │  as_slice   │         │   as_map    │        │    JSON     │
//!       │ (child env) │         │ (inspect)   │        │   (serde)   │
//!       └─────────────┘         └─────────────┘        └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use envstore::Environ;
//!
//! let env = Environ::new(["PATH=/usr/bin", "HOME=/root", "GITHUB_TOKEN=x", "GITHUB_SHA=y"]);
//! let missing = env.keep(&["PATH", "GITHUB_.*", "TERM"]).unwrap();
//!
//! assert_eq!(missing, vec!["TERM"]);
//! assert_eq!(env.keys(), vec!["GITHUB_SHA", "GITHUB_TOKEN", "PATH"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod lock;
pub mod environ;
pub mod filter;
pub mod source;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EnvError, Result};
pub use config::Config;
pub use environ::Environ;
pub use source::{from_env_file, from_os};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of envstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
