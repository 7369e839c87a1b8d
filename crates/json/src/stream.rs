//! Conversion from a streaming tokenizer's positioned values.
//!
//! A streaming collaborator exposes one value at a time without building a
//! tree. Scalars are copied straight into a blob; arrays and objects are taken
//! as raw sub-document text and re-parsed, which costs a second tokenization
//! but keeps a single encoding path for composites.

use crate::error;
use crate::value::JsonValue;
use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use basalt_core::Result;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Numeric subtype reported by the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberType {
    Signed,
    Unsigned,
    Float,
}

/// Value type reported by the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamType {
    Null,
    Number(NumberType),
    String,
    Bool,
    Array,
    Object,
    /// Anything else, carrying the collaborator's raw type code.
    Unknown(i32),
}

/// Failure reported by the collaborator while extracting a value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StreamError {
    message: String,
}

impl StreamError {
    /// Creates a collaborator error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The value does not have the requested type.
    pub fn incorrect_type(expected: &str) -> Self {
        Self::new(alloc::format!("INCORRECT_TYPE: value is not {expected}"))
    }
}

/// A positioned value produced by a streaming JSON tokenizer.
pub trait StreamingValue {
    /// Reports the value's type.
    fn json_type(&self) -> core::result::Result<StreamType, StreamError>;
    /// Extracts a number that fits a signed 64-bit integer.
    fn get_i64(&self) -> core::result::Result<i64, StreamError>;
    /// Extracts a number that fits an unsigned 64-bit integer.
    fn get_u64(&self) -> core::result::Result<u64, StreamError>;
    /// Extracts a number as a double.
    fn get_f64(&self) -> core::result::Result<f64, StreamError>;
    /// Extracts a boolean.
    fn get_bool(&self) -> core::result::Result<bool, StreamError>;
    /// Returns the unescaped string contents.
    fn get_str(&self) -> core::result::Result<&str, StreamError>;
    /// Returns the raw JSON text of this value, including nested documents.
    fn raw_json(&self) -> core::result::Result<Cow<'_, str>, StreamError>;
}

fn rejected<V: StreamingValue + ?Sized>(value: &V, err: &StreamError) -> basalt_core::Error {
    let raw = value.raw_json().unwrap_or_default();
    error::stream_failure(&raw, err)
}

impl JsonValue {
    /// Builds a value from a collaborator's positioned value.
    ///
    /// Unknown types and collaborator failures are data quality errors. Raw
    /// composite text that fails to parse surfaces as a parse error.
    pub fn from_streaming_value<V: StreamingValue + ?Sized>(value: &V) -> Result<Self> {
        let json_type = value.json_type().map_err(|e| rejected(value, &e))?;
        let built = match json_type {
            StreamType::Null => Ok(JsonValue::from_null()),
            StreamType::Number(NumberType::Signed) => value.get_i64().map(JsonValue::from_int),
            StreamType::Number(NumberType::Unsigned) => value.get_u64().map(JsonValue::from_uint),
            StreamType::Number(NumberType::Float) => value.get_f64().map(JsonValue::from_double),
            StreamType::String => value.get_str().map(JsonValue::from_string),
            StreamType::Bool => value.get_bool().map(JsonValue::from_bool),
            StreamType::Array | StreamType::Object => {
                return Self::from_streaming_object(value);
            }
            StreamType::Unknown(code) => return Err(error::unsupported_stream_type(code)),
        };
        built.map_err(|e| rejected(value, &e))
    }

    /// Builds a value from a collaborator's composite value via its raw text.
    pub fn from_streaming_object<V: StreamingValue + ?Sized>(value: &V) -> Result<Self> {
        let raw = value.raw_json().map_err(|e| error::stream_failure("", &e))?;
        trace!(len = raw.len(), "re-parsing composite streaming value");
        JsonValue::parse(raw.as_bytes())
    }
}

/// A materialized `serde_json` tree can stand in for a streaming tokenizer.
impl StreamingValue for Value {
    fn json_type(&self) -> core::result::Result<StreamType, StreamError> {
        Ok(match self {
            Value::Null => StreamType::Null,
            Value::Bool(_) => StreamType::Bool,
            Value::Number(n) if n.is_i64() => StreamType::Number(NumberType::Signed),
            Value::Number(n) if n.is_u64() => StreamType::Number(NumberType::Unsigned),
            Value::Number(_) => StreamType::Number(NumberType::Float),
            Value::String(_) => StreamType::String,
            Value::Array(_) => StreamType::Array,
            Value::Object(_) => StreamType::Object,
        })
    }

    fn get_i64(&self) -> core::result::Result<i64, StreamError> {
        self.as_i64()
            .ok_or_else(|| StreamError::incorrect_type("a signed integer"))
    }

    fn get_u64(&self) -> core::result::Result<u64, StreamError> {
        self.as_u64()
            .ok_or_else(|| StreamError::incorrect_type("an unsigned integer"))
    }

    fn get_f64(&self) -> core::result::Result<f64, StreamError> {
        self.as_f64()
            .ok_or_else(|| StreamError::incorrect_type("a number"))
    }

    fn get_bool(&self) -> core::result::Result<bool, StreamError> {
        self.as_bool()
            .ok_or_else(|| StreamError::incorrect_type("a boolean"))
    }

    fn get_str(&self) -> core::result::Result<&str, StreamError> {
        self.as_str()
            .ok_or_else(|| StreamError::incorrect_type("a string"))
    }

    fn raw_json(&self) -> core::result::Result<Cow<'_, str>, StreamError> {
        serde_json::to_string(self)
            .map(Cow::Owned)
            .map_err(|e| StreamError::new(e.to_string()))
    }
}
