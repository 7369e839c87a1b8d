//! JSON text parsing into the binary encoding.
//!
//! Text is tokenized by `serde_json` and the resulting tree is written into a
//! fresh blob. Object keys are sorted while encoding; for duplicate keys the
//! last occurrence wins.

use crate::binary::{Encoder, DEFAULT_MAX_DEPTH, TAG_ARRAY, TAG_OBJECT};
use crate::error::{self, EncodeError};
use crate::value::JsonValue;
use alloc::vec::Vec;
use basalt_core::Result;
use serde_json::{Number, Value};

/// Options controlling how text is turned into a blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum array/object nesting accepted.
    ///
    /// The tokenizer stops at [`DEFAULT_MAX_DEPTH`] on its own, so larger
    /// values do not admit deeper documents from text.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates options with the default depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl JsonValue {
    /// Parses JSON text. Empty input yields the absent value.
    pub fn parse(src: impl AsRef<[u8]>) -> Result<Self> {
        Self::parse_with(src, &ParseOptions::default())
    }

    /// Parses JSON text with explicit options.
    pub fn parse_with(src: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Self> {
        let src = src.as_ref();
        if src.is_empty() {
            return Ok(JsonValue::absent());
        }
        let tree: Value = serde_json::from_slice(src).map_err(error::syntax_error)?;
        encode_tree(&tree, options.max_depth)
            .map(JsonValue::from_encoded)
            .map_err(error::text_encode_error)
    }

    /// Encodes an already materialized `serde_json` tree.
    ///
    /// Encoder failures other than excess nesting are internal encoding errors
    /// here, since no text was involved.
    pub fn from_serde(value: &Value) -> Result<Self> {
        encode_tree(value, DEFAULT_MAX_DEPTH)
            .map(JsonValue::from_encoded)
            .map_err(error::encode_error)
    }
}

fn encode_tree(value: &Value, max_depth: usize) -> core::result::Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new();
    write_value(&mut enc, value, 0, max_depth)?;
    Ok(enc.finish())
}

// Recursion is bounded by `max_depth`, checked before descending.
fn write_value(
    enc: &mut Encoder,
    value: &Value,
    depth: usize,
    max_depth: usize,
) -> core::result::Result<(), EncodeError> {
    match value {
        Value::Null => enc.null(),
        Value::Bool(b) => enc.bool(*b),
        Value::Number(n) => write_number(enc, n)?,
        Value::String(s) => enc.string(s),
        Value::Array(items) => {
            let depth = descend(depth, max_depth)?;
            let node = enc.begin_composite(TAG_ARRAY, items.len())?;
            for (index, item) in items.iter().enumerate() {
                enc.mark_child(node, index)?;
                write_value(enc, item, depth, max_depth)?;
            }
            enc.finish_composite(node)?;
        }
        Value::Object(map) => {
            let depth = descend(depth, max_depth)?;
            let mut fields: Vec<(&str, &Value)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
            fields.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            let node = enc.begin_composite(TAG_OBJECT, fields.len())?;
            for (index, (key, item)) in fields.into_iter().enumerate() {
                enc.mark_child(node, index)?;
                enc.key(key);
                write_value(enc, item, depth, max_depth)?;
            }
            enc.finish_composite(node)?;
        }
    }
    Ok(())
}

fn descend(depth: usize, max_depth: usize) -> core::result::Result<usize, EncodeError> {
    let depth = depth + 1;
    if depth > max_depth {
        return Err(EncodeError::TooDeep { limit: max_depth });
    }
    Ok(depth)
}

/// Picks the narrowest subtype: signed, then unsigned, then double.
fn write_number(enc: &mut Encoder, n: &Number) -> core::result::Result<(), EncodeError> {
    if let Some(v) = n.as_i64() {
        enc.int(v);
    } else if let Some(v) = n.as_u64() {
        enc.uint(v);
    } else {
        enc.double(n.as_f64().ok_or(EncodeError::UnsupportedNumber)?);
    }
    Ok(())
}
