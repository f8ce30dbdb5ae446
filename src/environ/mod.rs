//! Environ Module
//!
//! In-memory environment variables, kept apart from the real process
//! environment.
//!
//! ## Responsibilities
//! - Lenient `key=value` parsing (`.env` style comments and blank lines)
//! - Shared reads / exclusive writes behind one lock
//! - Deterministic, sorted exports for child processes
//! - Regex keep/drop filtering
//!
//! ## Data Structure Choice
//! BTreeMap wrapped in a RwLock:
//! - Keys come out sorted without an extra pass
//! - Sorted keys let prefix patterns stop scanning early

mod parse;
mod store;

pub use parse::{parse_entries, parse_entry, render_entries};
pub use store::Environ;
