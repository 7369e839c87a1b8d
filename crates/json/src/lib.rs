//! Basalt JSON - binary JSON value type for the Basalt column store.
//!
//! This crate provides a self-contained JSON column type:
//!
//! - `JsonValue`: an owned blob holding one encoded document, or the absent state
//! - `JsonRef`: a borrowed view with O(1) element and O(log n) field access
//! - `compare` / `compare_raw`: ordering computed directly on encoded bytes
//! - `hash`: deterministic 64-bit digest of normalized content
//! - text parsing and canonical single-line rendering
//! - `StreamingValue`: the seam to a streaming tokenizer
//!
//! # Example
//!
//! ```rust
//! use basalt_json::{JsonType, JsonValue};
//! use core::cmp::Ordering;
//!
//! let doc = JsonValue::parse(r#"{"b": [1, 2, 3], "a": 1}"#).unwrap();
//! assert_eq!(doc.get_type(), JsonType::Object);
//! assert_eq!(doc.to_json_string().unwrap(), r#"{"a":1,"b":[1,2,3]}"#);
//!
//! // numeric subtypes compare by value
//! assert_eq!(JsonValue::from_int(3).compare(&JsonValue::from_double(3.0)), Ordering::Equal);
//!
//! // blobs are stored as plain bytes by the column layer
//! let mut cell = vec![0u8; doc.serialize_size()];
//! doc.serialize(&mut cell);
//! assert_eq!(JsonValue::from_slice(&cell).unwrap(), doc);
//! ```

#![no_std]

extern crate alloc;

mod binary;
mod compare;
mod error;
mod format;
mod hash;
mod parse;
mod reader;
mod stream;
mod value;

pub use basalt_core::{Error, JsonType, Result};
pub use binary::DEFAULT_MAX_DEPTH;
pub use compare::{compare, compare_raw};
pub use hash::hash;
pub use parse::ParseOptions;
pub use reader::{Elements, Fields, JsonRef};
pub use stream::{NumberType, StreamError, StreamType, StreamingValue};
pub use value::JsonValue;
