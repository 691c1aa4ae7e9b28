//! Matching names against sets of compiled globs.

use crate::glob::GlobPattern;

/// Check if `name` matches at least one pattern.
///
/// An empty pattern set matches nothing.
pub fn matches_any(name: &str, patterns: &[GlobPattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches(name))
}

/// Keep the names that match at least one pattern, in their original order.
pub fn filter_names<S: AsRef<str>>(names: &[S], patterns: &[GlobPattern]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| matches_any(name, patterns))
        .map(str::to_string)
        .collect()
}
