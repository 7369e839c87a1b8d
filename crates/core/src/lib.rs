//! Basalt Core - Core types shared by the Basalt JSON column type.
//!
//! This crate provides the foundational types used by `basalt-json` and by the
//! host column layer that stores its blobs:
//!
//! - `JsonType`: root tag of an encoded value (absent, null, bool, int, uint,
//!   double, string, array, object and the two comparator sentinels)
//! - `Error`: the typed error taxonomy every public operation returns
//!
//! # Example
//!
//! ```rust
//! use basalt_core::{Error, JsonType};
//!
//! let err = Error::type_mismatch("int", JsonType::String);
//! assert!(err.is_user_error());
//! ```

#![no_std]

extern crate alloc;

mod error;
mod types;

pub use error::{Error, Result};
pub use types::JsonType;
