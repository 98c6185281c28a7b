//! Dotted key-path navigation over decoded JSON.
//!
//! A path such as `urls.0` is split on `.`; each segment addresses a mapping
//! key, or a sequence index when it is made only of ASCII digits:
//!
//! ```rust
//! use youchuan_rs::{extract, render, KeyPath};
//!
//! let path = KeyPath::parse("urls.1");
//! let value = extract(r#"{"urls": ["a", "b"]}"#, &path).unwrap();
//! assert_eq!(render(&value, true), "b");
//!
//! assert!(extract(r#"{"a": 1}"#, &path).is_err());
//! ```

use serde_json::Value;

use crate::error::PathError;

/// One `.`-separated piece of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: String,
    /// Non-empty and all ASCII digits, so usable as a sequence index.
    pub numeric: bool,
}

impl Segment {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            numeric: !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

/// Parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// Trim, then split on `.`. Empty segments are kept and match only an
    /// empty mapping key.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.trim().split('.').map(Segment::new).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Extraction input: JSON text, or a value the host already decoded.
#[derive(Debug, Clone, Copy)]
pub enum JsonInput<'a> {
    Text(&'a str),
    Value(&'a Value),
}

impl<'a> From<&'a str> for JsonInput<'a> {
    fn from(text: &'a str) -> Self {
        JsonInput::Text(text)
    }
}

impl<'a> From<&'a String> for JsonInput<'a> {
    fn from(text: &'a String) -> Self {
        JsonInput::Text(text)
    }
}

impl<'a> From<&'a Value> for JsonInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            // A string handed over by the host is still JSON text.
            Value::String(text) => JsonInput::Text(text),
            other => JsonInput::Value(other),
        }
    }
}

/// Resolve `path` against `input`, returning a copy of the addressed value.
pub fn extract<'a>(input: impl Into<JsonInput<'a>>, path: &KeyPath) -> Result<Value, PathError> {
    match input.into() {
        JsonInput::Text(text) => {
            let root: Value = serde_json::from_str(text)?;
            lookup(&root, path).cloned()
        }
        JsonInput::Value(root) => lookup(root, path).cloned(),
    }
}

/// Borrowing variant of [`extract`] over an already-decoded root.
pub fn lookup<'v>(root: &'v Value, path: &KeyPath) -> Result<&'v Value, PathError> {
    path.segments.iter().try_fold(root, |current, segment| match current {
        Value::Object(map) => map
            .get(&segment.key)
            .ok_or_else(|| PathError::KeyNotFound(segment.key.clone())),
        Value::Array(items) if segment.numeric => segment
            .key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .ok_or_else(|| PathError::IndexOutOfRange {
                index: segment.key.clone(),
                len: items.len(),
            }),
        _ => Err(PathError::KeyNotFound(segment.key.clone())),
    })
}

/// Format an extracted value for host output.
///
/// Strings come back without quotes. With `return_as_string` composites are
/// pretty-printed and other scalars use their JSON text (`null` included);
/// without it composites are compact and `null` becomes the empty string.
pub fn render(value: &Value, return_as_string: bool) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null if !return_as_string => String::new(),
        Value::Object(_) | Value::Array(_) if return_as_string => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

/// Re-parse rendered output for structured preview, falling back to the text.
pub fn preview(rendered: &str) -> Value {
    serde_json::from_str(rendered).unwrap_or_else(|_| Value::String(rendered.to_string()))
}
