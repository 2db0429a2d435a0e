//! HTML escaping of untrusted data.
//!
//! # Responsibilities
//! - Escape HTML-significant characters in scalar strings
//! - Walk arbitrary JSON structures and escape every string leaf and key
//!
//! # Design Decisions
//! - Escaping is a single pass: an `&` in the input is escaped once and the
//!   entities we insert are never rescanned. Output is not idempotent;
//!   sanitizing twice escapes the `&` of the first pass.
//! - The deep walk never mutates its input and always builds a new value
//! - Recursion depth is bounded; exceeding it is an error, not a truncation

use serde_json::{Map, Value};
use thiserror::Error;

/// Default nesting limit, equal to serde_json's own parser recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Escape `& < > " ' /` as HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value that is expected to be a string.
///
/// Anything other than a string yields an empty string; callers must not
/// rely on this to preserve non-string values.
pub fn sanitize_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape_html(s),
        _ => String::new(),
    }
}

/// Errors produced by the deep sanitizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("input nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

/// Recursive sanitizer over JSON values.
#[derive(Debug, Clone, Copy)]
pub struct DeepSanitizer {
    max_depth: usize,
}

impl DeepSanitizer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Return a sanitized copy of `value` with the same shape.
    ///
    /// Strings and object keys are escaped; arrays keep order and length;
    /// numbers, booleans and null are copied unchanged. When two keys escape
    /// to the same string, the later one in iteration order wins.
    pub fn sanitize(&self, value: &Value) -> Result<Value, SanitizeError> {
        self.walk(value, 0)
    }

    fn walk(&self, value: &Value, depth: usize) -> Result<Value, SanitizeError> {
        match value {
            Value::String(s) => Ok(Value::String(escape_html(s))),
            Value::Array(items) => {
                let depth = self.descend(depth)?;
                items
                    .iter()
                    .map(|item| self.walk(item, depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            Value::Object(entries) => {
                let depth = self.descend(depth)?;
                let mut sanitized = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    sanitized.insert(escape_html(key), self.walk(item, depth)?);
                }
                Ok(Value::Object(sanitized))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
        }
    }

    fn descend(&self, depth: usize) -> Result<usize, SanitizeError> {
        if depth >= self.max_depth {
            return Err(SanitizeError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(depth + 1)
    }
}

impl Default for DeepSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Deep-sanitize with the default depth limit.
pub fn sanitize_deep(value: &Value) -> Result<Value, SanitizeError> {
    DeepSanitizer::default().sanitize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_script_tag() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(
            escape_html(r#"a & b "c" 'd' </e>"#),
            "a &amp; b &quot;c&quot; &#x27;d&#x27; &lt;&#x2F;e&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html("ünïcödé"), "ünïcödé");
    }

    #[test]
    fn test_existing_entities_are_escaped_once() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        // Second pass escapes the ampersands inserted by the first
        let once = escape_html("<b>");
        assert_eq!(once, "&lt;b&gt;");
        assert_eq!(escape_html(&once), "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn test_non_string_yields_empty() {
        assert_eq!(sanitize_value(&json!("<i>")), "&lt;i&gt;");
        assert_eq!(sanitize_value(&json!(42)), "");
        assert_eq!(sanitize_value(&json!(null)), "");
        assert_eq!(sanitize_value(&json!({"a": 1})), "");
    }

    #[test]
    fn test_deep_preserves_shape() {
        let input = json!({
            "name": "<b>Jo</b>",
            "count": 3,
            "active": true,
            "missing": null,
            "tags": ["a/b", 1, false, ["<x>"]],
            "nested": {"<k>": "'v'"}
        });
        let output = sanitize_deep(&input).unwrap();

        assert_eq!(
            output,
            json!({
                "name": "&lt;b&gt;Jo&lt;&#x2F;b&gt;",
                "count": 3,
                "active": true,
                "missing": null,
                "tags": ["a&#x2F;b", 1, false, ["&lt;x&gt;"]],
                "nested": {"&lt;k&gt;": "&#x27;v&#x27;"}
            })
        );
        // Input untouched
        assert_eq!(input["name"], "<b>Jo</b>");
        assert!(input["nested"].get("<k>").is_some());
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(sanitize_deep(&json!(1.5)).unwrap(), json!(1.5));
        assert_eq!(sanitize_deep(&json!(null)).unwrap(), json!(null));
        assert_eq!(sanitize_deep(&json!("&")).unwrap(), json!("&amp;"));
    }

    #[test]
    fn test_colliding_keys_keep_one_entry() {
        let input = json!({"<": 1, "&lt;": 2});
        let output = sanitize_deep(&input).unwrap();
        let obj = output.as_object().unwrap();
        // "<" escapes to "&lt;", "&lt;" escapes to "&amp;lt;": no collision
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["&lt;"], 1);
        assert_eq!(obj["&amp;lt;"], 2);
    }

    #[test]
    fn test_depth_limit() {
        let sanitizer = DeepSanitizer::new(3);

        let ok = json!({"a": {"b": ["leaf"]}});
        assert!(sanitizer.sanitize(&ok).is_ok());

        let too_deep = json!({"a": {"b": [["leaf"]]}});
        assert_eq!(
            sanitizer.sanitize(&too_deep),
            Err(SanitizeError::DepthExceeded { max_depth: 3 })
        );

        // Scalars never count against the limit
        assert!(DeepSanitizer::new(0).sanitize(&json!("x")).is_ok());
        assert!(DeepSanitizer::new(0).sanitize(&json!([])).is_err());
    }
}
