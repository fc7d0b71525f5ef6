use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::error::{NexusError, Result};

/// JSON canonicalizer configuration. Immutable per call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonOptions {
    /// Spaces per level: 0 (compact), 2, or 4.
    #[serde(default = "default_indent")]
    pub indent: usize,

    #[serde(default)]
    pub sort_keys: bool,

    #[serde(default)]
    pub escape_unicode: bool,
}

fn default_indent() -> usize {
    2
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: false,
            escape_unicode: false,
        }
    }
}

/// Recursively rebuild every object with keys in ordinal order. Arrays keep
/// element order; scalars pass through unchanged.
fn sort_keys_deep(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys_deep).collect()),
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys_deep(v));
            }
            Value::Object(sorted)
        }
        other => other,
    }
}

/// Rewrite every char with code point >= 0x7F as \uXXXX escapes over the
/// final serialized text. Astral chars become UTF-16 surrogate pairs, as a
/// host working in UTF-16 code units would emit them.
fn escape_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = [0u16; 2];
    for ch in text.chars() {
        if (ch as u32) < 0x7F {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut buf) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

fn parse_error(e: &serde_json::Error) -> NexusError {
    let full = e.to_string();
    // serde_json appends " at line L column C"; keep the bare message since
    // the position is carried structurally.
    let message = full
        .split(" at line ")
        .next()
        .unwrap_or(full.as_str())
        .to_string();
    NexusError::JsonParse {
        line: e.line(),
        column: e.column(),
        message,
    }
}

fn serialize(value: &Value, indent: usize) -> String {
    if indent == 0 {
        return value.to_string();
    }
    let unit = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(unit.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    // Serializing an in-memory Value to a Vec cannot fail.
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Parse the full input as one JSON document and re-serialize it. Returns
/// Ok(None) for empty or whitespace-only input; malformed JSON surfaces as
/// a single structured parse error, never a partial result.
pub fn canonicalize_json(input: &str, options: &JsonOptions) -> Result<Option<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| parse_error(&e))?;
    let value = if options.sort_keys {
        sort_keys_deep(value)
    } else {
        value
    };

    let json = serialize(&value, options.indent);
    Ok(Some(if options.escape_unicode {
        escape_unicode(&json)
    } else {
        json
    }))
}
