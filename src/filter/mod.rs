//! Filter Module
//!
//! Pattern matching behind `Environ::keep` and `Environ::drop`.
//!
//! ## Matching
//! 1. Patterns are sorted (and deduplicated) so results are deterministic
//! 2. Every pattern is compiled up front; one failure rejects the whole call
//! 3. Each pattern is matched against the keys in sorted order
//! 4. Matched keys and missing patterns come back sorted

mod pattern;

pub use pattern::Pattern;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

/// Outcome of matching a pattern list against a key set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    /// Keys matched by at least one pattern, sorted
    pub matched: Vec<String>,

    /// Patterns that matched no key, sorted
    pub missing: Vec<String>,
}

/// Match `patterns` against the keys of `map`.
///
/// Fails with [`EnvError::InvalidPattern`](crate::EnvError::InvalidPattern)
/// on the first pattern (in sorted order) that does not compile.
pub fn matching_keys<V, S>(map: &BTreeMap<String, V>, patterns: &[S]) -> Result<Matches>
where
    S: AsRef<str>,
{
    let mut sorted: Vec<&str> = patterns.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let compiled = sorted
        .into_iter()
        .map(Pattern::compile)
        .collect::<Result<Vec<_>>>()?;

    let mut matched = BTreeSet::new();
    let mut missing = Vec::new();
    for pattern in &compiled {
        if !pattern.collect_matches(map, &mut matched) {
            missing.push(pattern.as_str().to_string());
        }
    }

    Ok(Matches {
        matched: matched.into_iter().map(str::to_string).collect(),
        missing,
    })
}
