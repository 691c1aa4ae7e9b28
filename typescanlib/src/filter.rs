//! Exclusion filtering for type names.
//!
//! A [`NameFilter`] combines literal names and globs. Automatic entry-point
//! discovery consults it to skip types the caller never wants processed.

use crate::glob::GlobPattern;
use crate::matcher::matches_any;

/// Names and glob patterns to exclude.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    /// Fully-qualified names excluded verbatim
    pub names: Vec<String>,
    /// Glob patterns; a name matching any of them is excluded
    pub patterns: Vec<GlobPattern>,
}

impl NameFilter {
    /// Create a new empty filter (excludes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a single name.
    pub fn exclude_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Exclude every name matching `glob`.
    pub fn exclude_pattern(mut self, glob: &str) -> Self {
        self.patterns.push(GlobPattern::compile(glob));
        self
    }

    /// Exclude multiple names.
    pub fn exclude_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for name in names {
            self = self.exclude_name(name.as_ref());
        }
        self
    }

    /// Exclude multiple glob patterns.
    pub fn exclude_patterns<S: AsRef<str>>(mut self, globs: &[S]) -> Self {
        for glob in globs {
            self = self.exclude_pattern(glob.as_ref());
        }
        self
    }

    /// Whether the filter excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }

    /// Check if a name is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name) || matches_any(name, &self.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = NameFilter::new();

        assert!(filter.is_empty());
        assert!(!filter.is_excluded("com.example.Foo"));
    }

    #[test]
    fn test_exclude_by_name() {
        let filter = NameFilter::new().exclude_name("com.example.Foo");

        assert!(filter.is_excluded("com.example.Foo"));
        assert!(!filter.is_excluded("com.example.FooBar"));
    }

    #[test]
    fn test_exclude_by_pattern() {
        let filter = NameFilter::new().exclude_pattern("com.example.internal.**");

        assert!(filter.is_excluded("com.example.internal.Foo"));
        assert!(filter.is_excluded("com.example.internal.deep.Foo"));
        assert!(!filter.is_excluded("com.example.Foo"));
    }

    #[test]
    fn test_exclude_many() {
        let filter = NameFilter::new()
            .exclude_names(&["a.A", "b.B"])
            .exclude_patterns(&["c.*", "d.**"]);

        assert!(filter.is_excluded("a.A"));
        assert!(filter.is_excluded("b.B"));
        assert!(filter.is_excluded("c.C"));
        assert!(!filter.is_excluded("c.sub.C"));
        assert!(filter.is_excluded("d.sub.D"));
        assert!(!filter.is_excluded("e.E"));
    }
}
