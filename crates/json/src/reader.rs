//! Borrowed, zero-copy view over an encoded value.
//!
//! `JsonRef` reads tags, scalars and children straight out of the blob bytes.
//! Lookups go through the composite offset table: `at(i)` is O(1) and `get(key)`
//! is a binary search over the sorted entry table.

use crate::binary::{
    decode_varint, read_u32, read_u64, tag_type, validate, COMPOSITE_HEADER, DEFAULT_MAX_DEPTH,
    TAG_ARRAY, TAG_DOUBLE, TAG_FALSE, TAG_INT, TAG_OBJECT, TAG_STRING, TAG_TRUE, TAG_UINT,
};
use crate::error;
use basalt_core::{JsonType, Result};
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

/// A numeric scalar with its stored subtype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Uint(u64),
    Double(f64),
}

impl Number {
    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Uint(v) => v as f64,
            Number::Double(v) => v,
        }
    }
}

/// A borrowed view of one encoded JSON value (or of the absent value).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct JsonRef<'a> {
    data: &'a [u8],
}

impl<'a> JsonRef<'a> {
    /// Wraps bytes already known to hold a well-formed blob.
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Wraps raw bytes after checking that they hold a well-formed blob.
    ///
    /// An empty slice is the absent value.
    pub fn from_slice(data: &'a [u8]) -> Result<Self> {
        validate(data, DEFAULT_MAX_DEPTH).map_err(error::corrupt_blob)?;
        Ok(Self::new(data))
    }

    /// Returns the encoded bytes of this value.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the root type, read from the first byte only.
    #[inline]
    pub fn json_type(&self) -> JsonType {
        self.data.first().map_or(JsonType::Absent, |&tag| tag_type(tag))
    }

    /// Returns true if this is the absent value.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if this is JSON null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.json_type() == JsonType::Null
    }

    /// Returns the boolean value if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self.data.first()? {
            &TAG_TRUE => Some(true),
            &TAG_FALSE => Some(false),
            _ => None,
        }
    }

    /// Returns the numeric value with its stored subtype.
    pub(crate) fn number(&self) -> Option<Number> {
        let tag = *self.data.first()?;
        let bits = read_u64(self.data, 1);
        match tag {
            TAG_INT => bits.map(|b| Number::Int(b as i64)),
            TAG_UINT => bits.map(Number::Uint),
            TAG_DOUBLE => bits.map(|b| Number::Double(f64::from_bits(b))),
            _ => None,
        }
    }

    /// Returns the raw bytes of a string value.
    pub(crate) fn str_bytes(&self) -> Option<&'a [u8]> {
        if self.data.first() != Some(&TAG_STRING) {
            return None;
        }
        let mut pos = 1;
        let len = decode_varint(self.data, &mut pos)?;
        self.data.get(pos..pos.checked_add(len)?)
    }

    /// Returns the string if this is a String.
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.str_bytes()?).ok()
    }

    /// Returns the number of elements or fields. Scalars have none.
    pub fn len(&self) -> usize {
        match self.data.first() {
            Some(&TAG_ARRAY) | Some(&TAG_OBJECT) => read_u32(self.data, 5).unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns true if this has no elements or fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of child `index` inside a composite node.
    fn child(&self, index: usize) -> Option<&'a [u8]> {
        let count = self.len();
        if index >= count {
            return None;
        }
        let start = read_u32(self.data, COMPOSITE_HEADER + index * 4)?;
        let end = if index + 1 < count {
            read_u32(self.data, COMPOSITE_HEADER + (index + 1) * 4)?
        } else {
            self.data.len()
        };
        self.data.get(start..end)
    }

    /// Splits object entry `index` into its key bytes and value.
    fn entry(&self, index: usize) -> Option<(&'a [u8], JsonRef<'a>)> {
        if self.data.first() != Some(&TAG_OBJECT) {
            return None;
        }
        let entry = self.child(index)?;
        let mut pos = 0;
        let key_len = decode_varint(entry, &mut pos)?;
        let key_end = pos.checked_add(key_len)?;
        let key = entry.get(pos..key_end)?;
        let value = entry.get(key_end..)?;
        Some((key, JsonRef::new(value)))
    }

    /// Gets an array element by index. O(1)
    pub fn at(&self, index: usize) -> Option<JsonRef<'a>> {
        if self.data.first() != Some(&TAG_ARRAY) {
            return None;
        }
        self.child(index).map(JsonRef::new)
    }

    /// Gets an object field by position in stored (key) order. O(1)
    pub fn field_at(&self, index: usize) -> Option<(&'a str, JsonRef<'a>)> {
        let (key, value) = self.entry(index)?;
        Some((core::str::from_utf8(key).ok()?, value))
    }

    /// Gets an object field by key using binary search. O(log n)
    pub fn get(&self, key: &str) -> Option<JsonRef<'a>> {
        let needle = key.as_bytes();
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (probe, value) = self.entry(mid)?;
            match probe.cmp(needle) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(value),
            }
        }
        None
    }

    /// Returns an iterator over array elements.
    pub fn elements(&self) -> Elements<'a> {
        let len = if self.json_type() == JsonType::Array {
            self.len()
        } else {
            0
        };
        Elements {
            node: *self,
            index: 0,
            len,
        }
    }

    /// Returns an iterator over object fields in stored (key) order.
    pub fn fields(&self) -> Fields<'a> {
        let len = if self.json_type() == JsonType::Object {
            self.len()
        } else {
            0
        };
        Fields {
            node: *self,
            index: 0,
            len,
        }
    }
}

impl fmt::Debug for JsonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonRef")
            .field(&format_args!("{}", crate::format::render_lossy(*self)))
            .finish()
    }
}

/// Iterator over the elements of an array.
#[derive(Clone, Debug)]
pub struct Elements<'a> {
    node: JsonRef<'a>,
    index: usize,
    len: usize,
}

impl<'a> Iterator for Elements<'a> {
    type Item = JsonRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let item = self.node.at(self.index);
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Elements<'_> {}
impl FusedIterator for Elements<'_> {}

/// Iterator over the fields of an object.
#[derive(Clone, Debug)]
pub struct Fields<'a> {
    node: JsonRef<'a>,
    index: usize,
    len: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a str, JsonRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let item = self.node.field_at(self.index);
        self.index += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fields<'_> {}
impl FusedIterator for Fields<'_> {}
