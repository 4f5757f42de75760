//! [`JsonValue`]: the decoded form every parse node wraps.
//!
//! Numbers are always `f64`, so integral targets must check for a fractional
//! part before narrowing. Objects keep document order.

use indexmap::IndexMap;
use modelbind_util::{literal_f64, quote};

use crate::error::Result;

/// A fully decoded JSON document or subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Decodes raw JSON text. Malformed input fails here, before any
    /// navigation happens.
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(content)?;
        Ok(JsonValue::from(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Name of the JSON type, for log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Textual form quoted by coercion diagnostics.
    ///
    /// Strings appear verbatim without quotes, numbers in their compact
    /// form, containers as compact JSON.
    pub fn literal_text(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null
            | JsonValue::Bool(_)
            | JsonValue::Number(_)
            | JsonValue::Array(_)
            | JsonValue::Object(_) => {
                let mut out = String::new();
                self.write_compact(&mut out);
                out
            }
        }
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            JsonValue::Number(n) => out.push_str(&literal_f64(*n)),
            JsonValue::String(s) => out.push_str(&quote(s)),
            JsonValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_compact(out);
                }
                out.push(']');
            }
            JsonValue::Object(entries) => {
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&quote(key));
                    out.push(':');
                    item.write_compact(out);
                }
                out.push('}');
            }
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            // serde_json only yields None for arbitrary-precision numbers,
            // which this crate does not enable.
            serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(arr) => {
                JsonValue::Array(arr.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(obj) => JsonValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}
