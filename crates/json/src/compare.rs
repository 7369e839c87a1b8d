//! Ordering of encoded JSON values.
//!
//! The comparator works directly on blob bytes and walks nested containers with
//! an explicit stack, so document depth costs heap rather than call stack.
//!
//! Rules, in the order they are tried:
//!
//! - object vs object: walk the left fields in stored order and look each key
//!   up on the right. A key missing on the right makes the left side greater;
//!   otherwise the first non-equal field value decides. Fields present only on
//!   the right are never visited, so `{"a":1}` equals `{"a":1,"b":2}` while the
//!   reverse comparison is `Greater`.
//! - array vs array: compare positionally over the shorter length. A longer
//!   array with an equal prefix compares equal.
//! - same kind scalars: bools as 0/1, integers exactly, doubles by IEEE order
//!   with any NaN comparison treated as equal, strings byte-wise.
//! - mixed numeric subtypes: an integer against a double compares as doubles;
//!   signed against unsigned stays exact.
//! - different kinds: by category rank
//!   `MinKey < absent < null < bool < number < string < array < object < MaxKey`.

use crate::reader::{JsonRef, Number};
use crate::value::JsonValue;
use alloc::vec::Vec;
use basalt_core::{JsonType, Result};
use core::cmp::Ordering;

/// Category rank used when the two sides are of different kinds.
fn category(json_type: JsonType) -> u8 {
    match json_type {
        JsonType::MinKey => 0,
        JsonType::Absent => 1,
        JsonType::Null => 2,
        JsonType::Bool => 3,
        JsonType::Int | JsonType::Uint | JsonType::Double => 4,
        JsonType::String => 5,
        JsonType::Array => 6,
        JsonType::Object => 7,
        JsonType::MaxKey => 8,
    }
}

fn compare_doubles(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}

fn compare_numbers(left: Number, right: Number) -> Ordering {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => l.cmp(&r),
        (Number::Uint(l), Number::Uint(r)) => l.cmp(&r),
        (Number::Int(l), Number::Uint(r)) => i128::from(l).cmp(&i128::from(r)),
        (Number::Uint(l), Number::Int(r)) => i128::from(l).cmp(&i128::from(r)),
        (l, r) => compare_doubles(l.as_f64(), r.as_f64()),
    }
}

/// Compares two scalars, or two values of different kinds.
fn compare_leaves(left: JsonRef<'_>, right: JsonRef<'_>) -> Ordering {
    let (lt, rt) = (left.json_type(), right.json_type());
    let (lc, rc) = (category(lt), category(rt));
    if lc != rc {
        return lc.cmp(&rc);
    }
    match lt {
        JsonType::Bool => left.as_bool().cmp(&right.as_bool()),
        JsonType::Int | JsonType::Uint | JsonType::Double => match (left.number(), right.number()) {
            (Some(l), Some(r)) => compare_numbers(l, r),
            _ => Ordering::Equal,
        },
        JsonType::String => left.str_bytes().cmp(&right.str_bytes()),
        // absent, null and the sentinels carry no payload
        _ => Ordering::Equal,
    }
}

/// A container pair whose children are still being compared.
enum Frame<'a> {
    Object {
        left: JsonRef<'a>,
        right: JsonRef<'a>,
        next: usize,
    },
    Array {
        left: JsonRef<'a>,
        right: JsonRef<'a>,
        next: usize,
        len: usize,
    },
}

enum Step<'a> {
    Pair(JsonRef<'a>, JsonRef<'a>),
    MissingOnRight,
    Done,
}

impl<'a> Frame<'a> {
    fn advance(&mut self) -> Step<'a> {
        match self {
            Frame::Object { left, right, next } => {
                let Some((key, value)) = left.field_at(*next) else {
                    return Step::Done;
                };
                *next += 1;
                match right.get(key) {
                    Some(other) => Step::Pair(value, other),
                    None => Step::MissingOnRight,
                }
            }
            Frame::Array {
                left,
                right,
                next,
                len,
            } => {
                if *next >= *len {
                    return Step::Done;
                }
                let index = *next;
                *next += 1;
                match (left.at(index), right.at(index)) {
                    (Some(l), Some(r)) => Step::Pair(l, r),
                    _ => Step::Done,
                }
            }
        }
    }
}

/// Either opens a frame for a container pair or compares leaves outright.
fn visit<'a>(left: JsonRef<'a>, right: JsonRef<'a>, stack: &mut Vec<Frame<'a>>) -> Ordering {
    match (left.json_type(), right.json_type()) {
        (JsonType::Object, JsonType::Object) => {
            stack.push(Frame::Object {
                left,
                right,
                next: 0,
            });
            Ordering::Equal
        }
        (JsonType::Array, JsonType::Array) => {
            stack.push(Frame::Array {
                left,
                right,
                next: 0,
                len: left.len().min(right.len()),
            });
            Ordering::Equal
        }
        _ => compare_leaves(left, right),
    }
}

/// Compares two encoded values.
pub fn compare(left: JsonRef<'_>, right: JsonRef<'_>) -> Ordering {
    let mut stack = Vec::new();
    let ord = visit(left, right, &mut stack);
    if ord != Ordering::Equal {
        return ord;
    }
    while let Some(frame) = stack.last_mut() {
        match frame.advance() {
            Step::Done => {
                stack.pop();
            }
            Step::MissingOnRight => return Ordering::Greater,
            Step::Pair(l, r) => {
                let ord = visit(l, r, &mut stack);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
    Ordering::Equal
}

/// Compares two raw encoded regions, e.g. cells of a column buffer.
///
/// Both regions are validated first; an empty region is the absent value.
pub fn compare_raw(left: &[u8], right: &[u8]) -> Result<Ordering> {
    let left = JsonRef::from_slice(left)?;
    let right = JsonRef::from_slice(right)?;
    Ok(compare(left, right))
}

impl JsonValue {
    /// Compares against another value. See the module docs for the rules.
    pub fn compare(&self, other: &JsonValue) -> Ordering {
        compare(self.view(), other.view())
    }
}
