//! `key=value` parsing and rendering
//!
//! Parsing is lenient: anything that is not a usable entry is skipped
//! instead of reported.

use std::collections::BTreeMap;

/// Parse `key=value` lines into a map.
///
/// Skipped lines:
/// - empty lines and `#` comments (`.env` style input)
/// - lines with no `=` at all
/// - lines with an empty key (`=value`)
///
/// The value is everything after the first `=`, so it may itself contain `=`.
/// Later duplicates override earlier ones.
pub fn parse_entries<I, S>(lines: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = BTreeMap::new();
    for line in lines {
        if let Some((key, value)) = parse_entry(line.as_ref()) {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}

/// Split a single line into key and value, or `None` when it is skipped.
pub fn parse_entry(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match line.split_once('=') {
        Some(("", _)) => None,
        Some(entry) => Some(entry),
        None => None,
    }
}

/// Render a map as `key=value` strings, sorted by the rendered string.
///
/// Note the sort is over the whole rendered string: `A0=x` sorts before
/// `A=y` because `0` < `=`.
pub fn render_entries(map: &BTreeMap<String, String>) -> Vec<String> {
    let mut lines: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    lines.sort();
    lines
}
