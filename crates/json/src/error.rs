//! Translation of codec, text and collaborator failures into `basalt_core::Error`.
//!
//! Every public entry point of this crate funnels its failures through one of
//! these functions, so the error taxonomy and the diagnostics emitted for each
//! kind live in one place.

use crate::stream::StreamError;
use alloc::format;
use alloc::string::{String, ToString};
use basalt_core::Error;
use tracing::{debug, warn};

/// Failures raised while building a blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EncodeError {
    /// Array/object nesting deeper than the configured limit.
    TooDeep { limit: usize },
    /// A node or the whole document outgrew the 32-bit offsets.
    TooLarge,
    /// A number the codec has no subtype for.
    UnsupportedNumber,
}

/// Malformed JSON text.
pub(crate) fn syntax_error(err: serde_json::Error) -> Error {
    debug!(error = %err, line = err.line(), column = err.column(), "json text rejected");
    Error::parse(err.to_string())
}

impl EncodeError {
    fn message(self) -> String {
        match self {
            EncodeError::TooDeep { limit } => format!("nesting depth exceeds limit of {limit}"),
            EncodeError::TooLarge => "document exceeds 32-bit node size".to_string(),
            EncodeError::UnsupportedNumber => {
                "number has no signed, unsigned or double form".to_string()
            }
        }
    }
}

/// Builder failure while encoding text that was just tokenized.
///
/// Any encoder failure while parsing text is a parse error.
pub(crate) fn text_encode_error(err: EncodeError) -> Error {
    debug!(error = ?err, "json text could not be encoded");
    Error::parse(err.message())
}

/// Builder failure while encoding an already materialized tree.
pub(crate) fn encode_error(err: EncodeError) -> Error {
    match err {
        EncodeError::TooDeep { limit } => {
            debug!(limit, "json tree nested too deeply");
            Error::parse(err.message())
        }
        EncodeError::TooLarge | EncodeError::UnsupportedNumber => {
            debug!(error = ?err, "json tree could not be encoded");
            Error::internal_encoding(err.message())
        }
    }
}

/// Failure while rendering a blob back to text.
pub(crate) fn render_error(err: serde_json::Error) -> Error {
    debug!(error = %err, "json value could not be rendered");
    Error::internal_encoding(err.to_string())
}

/// Raw bytes that do not hold a well-formed blob.
pub(crate) fn corrupt_blob(reason: &'static str) -> Error {
    debug!(reason, "corrupt json blob");
    Error::internal_encoding(format!("corrupt json blob: {reason}"))
}

/// Streaming value whose type the codec has no encoding for.
pub(crate) fn unsupported_stream_type(code: i32) -> Error {
    warn!(code, "unsupported streaming json type");
    Error::data_quality(format!("Unsupported json type: {code}"))
}

/// Streaming collaborator failed while extracting a value.
pub(crate) fn stream_failure(raw: &str, err: &StreamError) -> Error {
    warn!(error = %err, len = raw.len(), "streaming json value rejected");
    Error::data_quality(format!("Failed to parse value, json={raw}, error={err}"))
}
