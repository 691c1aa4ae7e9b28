//! Glob patterns over fully-qualified type names.
//!
//! Names use `.` between packages and `$` between an outer type and its
//! nested types, so the two wildcards differ only in whether they may cross
//! those separators:
//!
//! - `*` matches any run of characters except `.` and `$`
//! - `**` matches any run of characters, separators included
//!
//! Everything else is literal. A pattern must match the whole name.

use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Regex fragment for `**`.
const ANY: &str = ".*";
/// Regex fragment for `*`.
const ANY_WITHIN_SEGMENT: &str = "[^.$]*";
/// Compiled-size budget for a glob's regex; larger globs use [`Matcher::Units`].
const REGEX_SIZE_LIMIT: usize = 16 * (1 << 20);

/// A compiled glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    glob: String,
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Globs whose regex exceeds the size budget
    Units(Vec<Unit>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Char(char),
    Star,
    DoubleStar,
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Star,
    DoubleStar,
}

/// Split a glob into literal runs and wildcards.
///
/// Stars are taken greedily two at a time, so `***` becomes `**` followed
/// by `*`.
fn tokenize(glob: &str) -> Vec<Token<'_>> {
    let bytes = glob.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        if literal_start < i {
            tokens.push(Token::Literal(&glob[literal_start..i]));
        }
        if bytes.get(i + 1) == Some(&b'*') {
            tokens.push(Token::DoubleStar);
            i += 2;
        } else {
            tokens.push(Token::Star);
            i += 1;
        }
        literal_start = i;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&glob[literal_start..]));
    }

    tokens
}

fn is_separator(c: char) -> bool {
    c == '.' || c == '$'
}

fn to_units(glob: &str) -> Vec<Unit> {
    let mut units = Vec::with_capacity(glob.len());
    for token in tokenize(glob) {
        match token {
            Token::Literal(text) => units.extend(text.chars().map(Unit::Char)),
            Token::Star => units.push(Unit::Star),
            Token::DoubleStar => units.push(Unit::DoubleStar),
        }
    }
    units
}

/// Full-match `name` against glob units.
///
/// Tracks which name positions are reachable after each unit, so the cost
/// is bounded by `units * chars` with no backtracking.
fn match_units(units: &[Unit], name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    let mut reachable = vec![false; chars.len() + 1];
    reachable[0] = true;
    let mut next = vec![false; chars.len() + 1];

    for unit in units {
        match *unit {
            Unit::Char(c) => {
                next[0] = false;
                for i in 0..chars.len() {
                    next[i + 1] = reachable[i] && chars[i] == c;
                }
            }
            Unit::Star => {
                next[0] = reachable[0];
                for i in 1..=chars.len() {
                    next[i] = reachable[i] || (next[i - 1] && !is_separator(chars[i - 1]));
                }
            }
            Unit::DoubleStar => {
                next[0] = reachable[0];
                for i in 1..=chars.len() {
                    next[i] = reachable[i] || next[i - 1];
                }
            }
        }
        std::mem::swap(&mut reachable, &mut next);
        if !reachable.contains(&true) {
            return false;
        }
    }

    reachable[chars.len()]
}

/// Translate a glob into an anchored regex source.
fn to_regex_source(glob: &str) -> String {
    let mut source = String::from("^(?:");
    for token in tokenize(glob) {
        match token {
            Token::Literal(text) => source.push_str(&regex::escape(text)),
            Token::Star => source.push_str(ANY_WITHIN_SEGMENT),
            Token::DoubleStar => source.push_str(ANY),
        }
    }
    source.push_str(")$");
    source
}

impl GlobPattern {
    /// Compile a glob. Every string is a valid glob.
    ///
    /// Globs too large for a regex are matched by walking their tokens
    /// directly, with the same semantics.
    pub fn compile(glob: &str) -> Self {
        let source = to_regex_source(glob);
        let matcher = match RegexBuilder::new(&source)
            .size_limit(REGEX_SIZE_LIMIT)
            .dfa_size_limit(REGEX_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => Matcher::Regex(regex),
            Err(e) => {
                debug!(glob_len = glob.len(), error = %e, "Glob too large for regex");
                Matcher::Units(to_units(glob))
            }
        };
        Self {
            glob: glob.to_string(),
            source,
            matcher,
        }
    }

    /// Compile several globs, keeping their order.
    pub fn compile_all<S: AsRef<str>>(globs: &[S]) -> Vec<Self> {
        globs.iter().map(|g| Self::compile(g.as_ref())).collect()
    }

    /// Check whether `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(name),
            Matcher::Units(units) => match_units(units, name),
        }
    }

    /// The glob this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// The regex the glob was translated to.
    pub fn regex_source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.glob == other.glob
    }
}

impl Eq for GlobPattern {}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob)
    }
}
