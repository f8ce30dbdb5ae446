//! Anchored key patterns

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use regex::Regex;

use crate::error::{EnvError, Result};

/// A compiled keep/drop pattern.
///
/// The pattern only matches when it covers the whole key, so `PATH` matches
/// `PATH` but not `PATHEXT`, while `GITHUB_.*` matches every `GITHUB_` key.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    prefix: String,
}

impl Pattern {
    /// Compile a pattern, anchoring it at both ends.
    pub fn compile(pattern: &str) -> Result<Self> {
        let invalid = |source| EnvError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };

        // Validate the pattern on its own first: wrapping it in a group could
        // otherwise balance stray parentheses like `a)(`.
        Regex::new(pattern).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            prefix: literal_prefix(pattern),
        })
    }

    /// The pattern as supplied by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Literal text every matching key must start with (may be empty).
    pub fn literal_prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the whole key matches.
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Add every key of `map` matching this pattern to `matched`.
    ///
    /// Returns `false` when no key matched.
    pub fn collect_matches<'a, V>(
        &self,
        map: &'a BTreeMap<String, V>,
        matched: &mut BTreeSet<&'a str>,
    ) -> bool {
        let mut found = false;

        if self.prefix.is_empty() {
            for key in map.keys() {
                if self.is_match(key) {
                    matched.insert(key);
                    found = true;
                }
            }
            return found;
        }

        // Keys sharing the prefix are one contiguous streak in sorted order:
        // start at the prefix and stop once the streak ends.
        let from = (Bound::Included(self.prefix.as_str()), Bound::Unbounded);
        for key in map.range::<str, _>(from).map(|(key, _)| key) {
            if !key.starts_with(&self.prefix) {
                break;
            }
            if self.is_match(key) {
                matched.insert(key);
                found = true;
            }
        }

        found
    }
}

/// Longest literal prefix every match of `pattern` must begin with.
///
/// Conservative: stops at the first character that is not `[A-Za-z0-9_]`,
/// drops a character followed by a quantifier, and gives up entirely on
/// alternation.
fn literal_prefix(pattern: &str) -> String {
    if pattern.contains('|') {
        return String::new();
    }

    let mut prefix = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            break;
        }
        if matches!(chars.peek(), Some('?' | '*' | '+' | '{')) {
            break;
        }
        prefix.push(c);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_prefix() {
        assert_eq!(literal_prefix("PATH"), "PATH");
        assert_eq!(literal_prefix("GITHUB_.*"), "GITHUB_");
        assert_eq!(literal_prefix("AB?C"), "A");
        assert_eq!(literal_prefix("AB{2}"), "A");
        assert_eq!(literal_prefix("A|B"), "");
        assert_eq!(literal_prefix("(?i)path"), "");
        assert_eq!(literal_prefix(".*_TOKEN"), "");
        assert_eq!(literal_prefix(r"A\.B"), "A");
    }

    #[test]
    fn test_anchored_match() {
        let pattern = Pattern::compile("PATH").unwrap();
        assert!(pattern.is_match("PATH"));
        assert!(!pattern.is_match("PATHEXT"));
        assert!(!pattern.is_match("MY_PATH"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = Pattern::compile("A|B").unwrap();
        assert!(pattern.is_match("A"));
        assert!(pattern.is_match("B"));
        assert!(!pattern.is_match("AB"));
        assert!(!pattern.is_match("XB"));
    }

    #[test]
    fn test_unbalanced_group_is_rejected() {
        let err = Pattern::compile("a)(").unwrap_err();
        assert_eq!(err.invalid_pattern(), Some("a)("));
    }

    #[test]
    fn test_prefix_scan_matches_full_scan() {
        let map: BTreeMap<String, ()> = ["A", "A_A", "A_B", "AB", "B", "B_A"]
            .into_iter()
            .map(|k| (k.to_string(), ()))
            .collect();

        for source in ["A", "A_.*", "A.*", "B_.*", "A_A|B", ".*_A"] {
            let pattern = Pattern::compile(source).unwrap();
            let mut scanned = BTreeSet::new();
            pattern.collect_matches(&map, &mut scanned);

            let expected: BTreeSet<&str> = map
                .keys()
                .map(String::as_str)
                .filter(|key| pattern.is_match(key))
                .collect();
            assert_eq!(scanned, expected, "pattern {source}");
        }
    }
}
