//! JsonValue type definitions for Basalt.
//!
//! This module defines `JsonValue`, an owned, immutable blob holding one encoded
//! JSON document or the absent state, together with its scalar constructors and
//! typed accessors.

use crate::binary::{sentinel, validate, Encoder, DEFAULT_MAX_DEPTH, TAG_MAX_KEY, TAG_MIN_KEY};
use crate::error;
use crate::reader::{JsonRef, Number};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use basalt_core::{Error, JsonType, Result};
use core::fmt;
use core::str::FromStr;

/// An encoded JSON document.
///
/// The empty blob is the absent value, which is not the same as JSON `null`.
/// Values are never mutated after construction; cloning copies the blob.
/// Equality is exact encoding equality.
///
/// Rendering to text and parsing back keeps every number's value but not
/// always its subtype: an unsigned value up to `i64::MAX` comes back as a
/// signed integer. Such pairs differ under `==` yet compare `Equal` and hash
/// alike.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct JsonValue {
    binary: Vec<u8>,
}

impl JsonValue {
    pub(crate) fn from_encoded(binary: Vec<u8>) -> Self {
        Self { binary }
    }

    fn scalar(write: impl FnOnce(&mut Encoder)) -> Self {
        let mut enc = Encoder::new();
        write(&mut enc);
        Self::from_encoded(enc.finish())
    }

    /// Creates the absent value.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Creates JSON null.
    pub fn from_null() -> Self {
        Self::scalar(Encoder::null)
    }

    /// Creates a JSON boolean.
    pub fn from_bool(value: bool) -> Self {
        Self::scalar(|enc| enc.bool(value))
    }

    /// Creates a signed integer.
    pub fn from_int(value: i64) -> Self {
        Self::scalar(|enc| enc.int(value))
    }

    /// Creates an unsigned integer.
    pub fn from_uint(value: u64) -> Self {
        Self::scalar(|enc| enc.uint(value))
    }

    /// Creates a double.
    pub fn from_double(value: f64) -> Self {
        Self::scalar(|enc| enc.double(value))
    }

    /// Creates a JSON string.
    pub fn from_string(value: &str) -> Self {
        Self::scalar(|enc| enc.string(value))
    }

    /// Lower bound sentinel: compares less than every other value.
    pub fn min_key() -> Self {
        Self::from_encoded(sentinel(TAG_MIN_KEY))
    }

    /// Upper bound sentinel: compares greater than every other value.
    pub fn max_key() -> Self {
        Self::from_encoded(sentinel(TAG_MAX_KEY))
    }

    /// Rebuilds a value from bytes previously written by [`JsonValue::serialize`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        validate(bytes, DEFAULT_MAX_DEPTH).map_err(error::corrupt_blob)?;
        Ok(Self::from_encoded(bytes.to_vec()))
    }

    /// Returns a borrowed view of the encoding.
    #[inline]
    pub fn view(&self) -> JsonRef<'_> {
        JsonRef::new(&self.binary)
    }

    /// Returns the encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.binary
    }

    /// Consumes self and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.binary
    }

    /// Number of bytes [`JsonValue::serialize`] writes.
    #[inline]
    pub fn serialize_size(&self) -> usize {
        self.binary.len()
    }

    /// Copies the encoding into `dst` and returns the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`JsonValue::serialize_size`]. Callers size
    /// the column buffer up front, so a short buffer is a caller bug.
    pub fn serialize(&self, dst: &mut [u8]) -> usize {
        let len = self.binary.len();
        dst[..len].copy_from_slice(&self.binary);
        len
    }

    /// Returns the root type.
    #[inline]
    pub fn get_type(&self) -> JsonType {
        self.view().json_type()
    }

    /// Returns true if this is JSON null. The absent value is not null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.view().is_null()
    }

    /// Returns true if this is the absent value.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.binary.is_empty()
    }

    /// Returns the boolean if the root is a Bool.
    pub fn get_bool(&self) -> Result<bool> {
        self.view()
            .as_bool()
            .ok_or_else(|| Error::type_mismatch("bool", self.get_type()))
    }

    fn get_number(&self, expected: &'static str) -> Result<Number> {
        self.view()
            .number()
            .ok_or_else(|| Error::type_mismatch(expected, self.get_type()))
    }

    /// Returns the root number as i64.
    ///
    /// Unsigned values above `i64::MAX` and doubles outside the i64 range fail
    /// with `NumberOutOfRange`; other doubles are truncated toward zero.
    pub fn get_int(&self) -> Result<i64> {
        match self.get_number("int")? {
            Number::Int(v) => Ok(v),
            Number::Uint(v) => {
                i64::try_from(v).map_err(|_| Error::number_out_of_range(v.to_string(), "i64"))
            }
            Number::Double(v) => {
                // i64::MIN is exactly representable, i64::MAX + 1 is the first miss
                if v.is_finite() && v >= -9_223_372_036_854_775_808.0 && v < 9_223_372_036_854_775_808.0 {
                    Ok(v as i64)
                } else {
                    Err(Error::number_out_of_range(v.to_string(), "i64"))
                }
            }
        }
    }

    /// Returns the root number as u64.
    ///
    /// Negative integers and doubles outside the u64 range fail with
    /// `NumberOutOfRange`; other doubles are truncated toward zero.
    pub fn get_uint(&self) -> Result<u64> {
        match self.get_number("uint")? {
            Number::Int(v) => {
                u64::try_from(v).map_err(|_| Error::number_out_of_range(v.to_string(), "u64"))
            }
            Number::Uint(v) => Ok(v),
            Number::Double(v) => {
                if v.is_finite() && v > -1.0 && v < 18_446_744_073_709_551_616.0 {
                    Ok(v as u64)
                } else {
                    Err(Error::number_out_of_range(v.to_string(), "u64"))
                }
            }
        }
    }

    /// Returns the root number as f64, widening integers.
    pub fn get_double(&self) -> Result<f64> {
        self.get_number("double").map(Number::as_f64)
    }

    /// Returns the root string.
    pub fn get_string(&self) -> Result<&str> {
        self.view()
            .as_str()
            .ok_or_else(|| Error::type_mismatch("string", self.get_type()))
    }

    /// Copies out an object field. Returns None for missing keys and non-objects.
    pub fn get_field(&self, key: &str) -> Option<JsonValue> {
        self.view()
            .get(key)
            .map(|node| Self::from_encoded(node.as_bytes().to_vec()))
    }

    /// Copies out an array element. Returns None when out of bounds or not an array.
    pub fn get_index(&self, index: usize) -> Option<JsonValue> {
        self.view()
            .at(index)
            .map(|node| Self::from_encoded(node.as_bytes().to_vec()))
    }
}

impl fmt::Debug for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_absent() {
            return f.write_str("JsonValue(<absent>)");
        }
        f.debug_tuple("JsonValue")
            .field(&format_args!("{}", self.to_json_string_lossy()))
            .finish()
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string_lossy())
    }
}

impl FromStr for JsonValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// From implementations for convenient construction
impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue::from_bool(v)
    }
}

impl From<i32> for JsonValue {
    fn from(v: i32) -> Self {
        JsonValue::from_int(v.into())
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue::from_int(v)
    }
}

impl From<u64> for JsonValue {
    fn from(v: u64) -> Self {
        JsonValue::from_uint(v)
    }
}

impl From<f64> for JsonValue {
    fn from(v: f64) -> Self {
        JsonValue::from_double(v)
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue::from_string(v)
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue::from_string(&v)
    }
}

impl<T> From<Option<T>> for JsonValue
where
    T: Into<JsonValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => JsonValue::from_null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_scalar_types() {
        assert_eq!(JsonValue::from_null().get_type(), JsonType::Null);
        assert_eq!(JsonValue::from_bool(true).get_type(), JsonType::Bool);
        assert_eq!(JsonValue::from_int(-1).get_type(), JsonType::Int);
        assert_eq!(JsonValue::from_uint(1).get_type(), JsonType::Uint);
        assert_eq!(JsonValue::from_double(1.5).get_type(), JsonType::Double);
        assert_eq!(JsonValue::from_string("s").get_type(), JsonType::String);
        assert_eq!(JsonValue::min_key().get_type(), JsonType::MinKey);
        assert_eq!(JsonValue::max_key().get_type(), JsonType::MaxKey);
    }

    #[test]
    fn test_absent_vs_null() {
        let absent = JsonValue::absent();
        assert!(absent.is_absent());
        assert!(!absent.is_null());
        assert_eq!(absent.get_type(), JsonType::Absent);
        assert_eq!(absent.serialize_size(), 0);

        let null = JsonValue::from_null();
        assert!(null.is_null());
        assert!(!null.is_absent());
        assert_ne!(absent, null);
    }

    #[test]
    fn test_bool_accessor() {
        assert_eq!(JsonValue::from_bool(false).get_bool(), Ok(false));
        assert_eq!(
            JsonValue::from_int(1).get_bool(),
            Err(Error::type_mismatch("bool", JsonType::Int))
        );
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(JsonValue::from_int(-3).get_double(), Ok(-3.0));
        assert_eq!(JsonValue::from_uint(7).get_int(), Ok(7));
        assert_eq!(JsonValue::from_int(7).get_uint(), Ok(7));
        assert_eq!(JsonValue::from_double(2.9).get_int(), Ok(2));
        assert_eq!(JsonValue::from_double(-2.9).get_int(), Ok(-2));
        assert_eq!(JsonValue::from_double(2.9).get_uint(), Ok(2));
    }

    #[test]
    fn test_numeric_out_of_range() {
        assert!(matches!(
            JsonValue::from_uint(u64::MAX).get_int(),
            Err(Error::NumberOutOfRange { target: "i64", .. })
        ));
        assert!(matches!(
            JsonValue::from_int(-1).get_uint(),
            Err(Error::NumberOutOfRange { target: "u64", .. })
        ));
        assert!(matches!(
            JsonValue::from_double(1e300).get_int(),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert!(matches!(
            JsonValue::from_double(f64::NAN).get_uint(),
            Err(Error::NumberOutOfRange { .. })
        ));
        assert_eq!(JsonValue::from_double(-9.223_372_036_854_775_808e18).get_int(), Ok(i64::MIN));
    }

    #[test]
    fn test_string_accessor() {
        assert_eq!(JsonValue::from_string("x").get_string(), Ok("x"));
        assert_eq!(
            JsonValue::from_string("x").get_int(),
            Err(Error::type_mismatch("int", JsonType::String))
        );
        assert_eq!(
            JsonValue::absent().get_string(),
            Err(Error::type_mismatch("string", JsonType::Absent))
        );
    }

    #[test]
    fn test_serialize_roundtrip_bytes() {
        let v = JsonValue::parse(r#"{"a": [1, 2.5, "x"]}"#).unwrap();
        let mut buf = vec![0u8; v.serialize_size()];
        assert_eq!(v.serialize(&mut buf), buf.len());
        assert_eq!(JsonValue::from_slice(&buf).unwrap(), v);
    }

    #[test]
    #[should_panic]
    fn test_serialize_short_buffer_panics() {
        let v = JsonValue::from_string("too long");
        let mut buf = [0u8; 2];
        v.serialize(&mut buf);
    }

    #[test]
    fn test_from_slice_rejects_garbage() {
        let err = JsonValue::from_slice(&[0x09, 1, 2]).unwrap_err();
        assert!(matches!(err, Error::InternalEncoding { .. }));
        assert!(JsonValue::from_slice(&[]).unwrap().is_absent());
    }

    #[test]
    fn test_child_copies() {
        let v = JsonValue::parse(r#"{"list": [true, null]}"#).unwrap();
        let list = v.get_field("list").unwrap();
        assert_eq!(list.get_type(), JsonType::Array);
        assert_eq!(list.get_index(0).unwrap().get_bool(), Ok(true));
        assert!(list.get_index(1).unwrap().is_null());
        assert!(list.get_index(2).is_none());
        assert!(v.get_field("nope").is_none());
    }

    #[test]
    fn test_from_impls() {
        let v: JsonValue = true.into();
        assert_eq!(v.get_bool(), Ok(true));

        let v: JsonValue = 42i32.into();
        assert_eq!(v.get_type(), JsonType::Int);

        let v: JsonValue = 42u64.into();
        assert_eq!(v.get_type(), JsonType::Uint);

        let v: JsonValue = "hello".into();
        assert_eq!(v.get_string(), Ok("hello"));

        let v: JsonValue = None::<i64>.into();
        assert!(v.is_null());
    }

    #[test]
    fn test_from_str() {
        let v: JsonValue = "[1]".parse().unwrap();
        assert_eq!(v.get_type(), JsonType::Array);
        let v: JsonValue = "".parse().unwrap();
        assert!(v.is_absent());
    }
}
