//! Origin allow-list matching.
//!
//! # Responsibilities
//! - Hold the built-in trusted origins plus caller-supplied extensions
//! - Match a message origin against exact and wildcard patterns
//!
//! # Design Decisions
//! - Defaults come first and cannot be removed, only extended
//! - No regex: a pattern is a sequence of literal segments and wildcards,
//!   compared byte-for-byte, so `.` in a pattern is always a literal dot
//! - A wildcard consumes a non-empty run of host characters
//!   (ASCII alphanumerics, `-`, `.`); it never crosses `/`, `:` or `@`
//! - Matching is anchored to the whole origin string

/// Origins trusted by every gateway instance.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://app.chatwoot.com",
    "https://*.chatwoot.com",
    "http://localhost:3000",
    "http://localhost:8080",
];

const WILDCARD: char = '*';

/// A single allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPattern {
    /// Requires string equality.
    Exact(String),
    /// Literal segments separated by wildcards. `segments.len()` is the
    /// wildcard count plus one; leading/trailing segments may be empty.
    Wildcard { segments: Vec<String> },
}

impl OriginPattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Self {
        if pattern.contains(WILDCARD) {
            OriginPattern::Wildcard {
                segments: pattern.split(WILDCARD).map(str::to_string).collect(),
            }
        } else {
            OriginPattern::Exact(pattern.to_string())
        }
    }

    /// Returns true if `origin` matches this pattern in full.
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginPattern::Exact(expected) => origin == expected,
            OriginPattern::Wildcard { segments } => match_segments(segments, origin),
        }
    }
}

fn is_host_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'.'
}

/// Match `input` against `lit0 * lit1 * ... * litN`.
fn match_segments(segments: &[String], input: &str) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return input.is_empty();
    };
    let Some(remaining) = input.strip_prefix(first.as_str()) else {
        return false;
    };
    if rest.is_empty() {
        return remaining.is_empty();
    }

    // Every wildcard run is non-empty and made of host characters only, so
    // the candidate split points are bounded by the first non-host byte.
    let bytes = remaining.as_bytes();
    let run_limit = bytes
        .iter()
        .position(|b| !is_host_char(*b))
        .unwrap_or(bytes.len());

    (1..=run_limit).any(|split| match_segments(rest, &remaining[split..]))
}

/// Ordered set of trusted origin patterns.
#[derive(Debug, Clone)]
pub struct AllowList {
    patterns: Vec<OriginPattern>,
}

impl AllowList {
    /// Build the allow-list from the defaults followed by `extra`.
    pub fn new<S: AsRef<str>>(extra: &[S]) -> Self {
        let patterns = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|p| OriginPattern::parse(p))
            .chain(extra.iter().map(|p| OriginPattern::parse(p.as_ref())))
            .collect();
        Self { patterns }
    }

    /// Returns true if the origin matches any pattern.
    pub fn is_allowed(&self, origin: &str) -> bool {
        if origin.is_empty() {
            return false;
        }
        self.patterns.iter().any(|p| p.matches(origin))
    }

    /// Patterns in evaluation order.
    pub fn patterns(&self) -> &[OriginPattern] {
        &self.patterns
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new::<&str>(&[])
    }
}

/// One-shot origin check against the defaults plus `extra_allowed`.
pub fn is_allowed_origin<S: AsRef<str>>(origin: &str, extra_allowed: &[S]) -> bool {
    AllowList::new(extra_allowed).is_allowed(origin)
}
