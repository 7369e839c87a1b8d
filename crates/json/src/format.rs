//! Canonical single-line JSON text rendering.
//!
//! Rendering goes through `serde::Serialize` for `JsonRef`, so the output uses
//! `serde_json`'s escaping and shortest round-trip float formatting. Doubles keep
//! a fractional part (`3.0`), which lets the text parse back to the same numeric
//! subtype.

use crate::error;
use crate::reader::{JsonRef, Number};
use crate::value::JsonValue;
use alloc::string::String;
use basalt_core::{JsonType, Result};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for JsonRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self.json_type() {
            JsonType::Absent => serializer.serialize_none(),
            JsonType::Null => serializer.serialize_unit(),
            JsonType::Bool => serializer.serialize_bool(self.as_bool() == Some(true)),
            JsonType::Int | JsonType::Uint | JsonType::Double => match self.number() {
                Some(Number::Int(v)) => serializer.serialize_i64(v),
                Some(Number::Uint(v)) => serializer.serialize_u64(v),
                Some(Number::Double(v)) if v.is_finite() => serializer.serialize_f64(v),
                Some(Number::Double(_)) => Err(S::Error::custom("non-finite double has no JSON text")),
                None => Err(S::Error::custom("truncated number")),
            },
            JsonType::String => match self.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => Err(S::Error::custom("string is not valid UTF-8")),
            },
            JsonType::Array => {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for element in self.elements() {
                    seq.serialize_element(&element)?;
                }
                seq.end()
            }
            JsonType::Object => {
                let mut map = serializer.serialize_map(Some(self.len()))?;
                for (key, value) in self.fields() {
                    map.serialize_entry(key, &value)?;
                }
                map.end()
            }
            JsonType::MinKey | JsonType::MaxKey => {
                Err(S::Error::custom("range sentinel has no JSON text"))
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

/// Renders a view as JSON text. The absent value renders as empty text.
pub(crate) fn render(node: JsonRef<'_>) -> Result<String> {
    if node.is_absent() {
        return Ok(String::new());
    }
    serde_json::to_string(&node).map_err(error::render_error)
}

/// Renders a view, collapsing any failure to empty text.
pub(crate) fn render_lossy(node: JsonRef<'_>) -> String {
    render(node).unwrap_or_default()
}

impl JsonValue {
    /// Renders canonical single-line JSON text.
    ///
    /// The absent value renders as empty text. Non-finite doubles and the range
    /// sentinels have no JSON form and fail with `InternalEncoding`.
    pub fn to_json_string(&self) -> Result<String> {
        render(self.view())
    }

    /// Like [`JsonValue::to_json_string`] but returns empty text on failure.
    pub fn to_json_string_lossy(&self) -> String {
        render_lossy(self.view())
    }
}
