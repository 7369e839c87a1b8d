//! Error types for Basalt JSON values.

use crate::types::JsonType;
use alloc::string::String;
use thiserror::Error;

/// Result type alias for Basalt operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error kinds surfaced by every public JSON operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed JSON text, or text nested deeper than the configured limit.
    #[error("Parse error: {message}")]
    Parse { message: String },
    /// A streaming value had a shape or type the codec cannot store.
    #[error("Data quality error: {message}")]
    DataQuality { message: String },
    /// Typed accessor called against an incompatible root tag.
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: JsonType,
    },
    /// Numeric root whose value does not fit the requested width.
    #[error("Number out of range: {value} does not fit {target}")]
    NumberOutOfRange { value: String, target: &'static str },
    /// Codec-level defect: corrupt blob, unencodable value, oversized document.
    #[error("Internal encoding error: {message}")]
    InternalEncoding { message: String },
}

impl Error {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates a data quality error.
    pub fn data_quality(message: impl Into<String>) -> Self {
        Error::DataQuality {
            message: message.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &'static str, got: JsonType) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates a number out of range error.
    pub fn number_out_of_range(value: impl Into<String>, target: &'static str) -> Self {
        Error::NumberOutOfRange {
            value: value.into(),
            target,
        }
    }

    /// Creates an internal encoding error.
    pub fn internal_encoding(message: impl Into<String>) -> Self {
        Error::InternalEncoding {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the input rather than by a codec defect.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::InternalEncoding { .. })
    }
}
