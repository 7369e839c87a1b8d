//! Root type tags for Basalt JSON values.
//!
//! A `JsonType` is what a caller sees when asking an encoded value for its kind.
//! It is derived from the first byte of the blob and never requires decoding the
//! rest of the document.

use core::fmt;

/// Kind of the root node of an encoded JSON value.
///
/// Numeric subtypes are kept apart: a value parsed from `3` is `Int`, one built
/// with an unsigned constructor is `Uint` and `3.0` is `Double`, even though all
/// three compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// Empty blob. Distinct from JSON `null`.
    Absent,
    /// JSON null
    Null,
    /// JSON boolean
    Bool,
    /// Signed 64-bit integer
    Int,
    /// Unsigned 64-bit integer
    Uint,
    /// IEEE-754 double
    Double,
    /// UTF-8 string
    String,
    /// JSON array
    Array,
    /// JSON object
    Object,
    /// Lower bound sentinel used by range comparisons.
    MinKey,
    /// Upper bound sentinel used by range comparisons.
    MaxKey,
}

impl JsonType {
    /// Returns true for the three numeric subtypes.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, JsonType::Int | JsonType::Uint | JsonType::Double)
    }

    /// Returns true for the signed and unsigned integer subtypes.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, JsonType::Int | JsonType::Uint)
    }

    /// Returns true for arrays and objects.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self, JsonType::Array | JsonType::Object)
    }

    /// Returns true for the comparator-only sentinels.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, JsonType::MinKey | JsonType::MaxKey)
    }

    /// Lower-case name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            JsonType::Absent => "absent",
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::Int => "int",
            JsonType::Uint => "uint",
            JsonType::Double => "double",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::MinKey => "min_key",
            JsonType::MaxKey => "max_key",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_numeric_predicates() {
        assert!(JsonType::Int.is_number());
        assert!(JsonType::Uint.is_integer());
        assert!(JsonType::Double.is_number());
        assert!(!JsonType::Double.is_integer());
        assert!(!JsonType::String.is_number());
    }

    #[test]
    fn test_absent_is_not_null() {
        assert_ne!(JsonType::Absent, JsonType::Null);
        assert_eq!(JsonType::Absent.to_string(), "absent");
        assert_eq!(JsonType::Null.to_string(), "null");
    }

    #[test]
    fn test_composite_and_sentinel() {
        assert!(JsonType::Array.is_composite());
        assert!(JsonType::Object.is_composite());
        assert!(!JsonType::Null.is_composite());
        assert!(JsonType::MinKey.is_sentinel());
        assert!(JsonType::MaxKey.is_sentinel());
    }
}
