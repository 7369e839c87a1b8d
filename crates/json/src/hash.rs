//! Deterministic 64-bit hashing of encoded JSON values.
//!
//! The digest is xxHash64 over a type-tagged pre-order walk of the blob. All
//! numeric subtypes are hashed as their f64 value, so `3`, `3u64` and `3.0`
//! collide on purpose, matching the comparator's numeric equality.
//!
//! # Determinism
//!
//! - All NaN values → fixed canonical bit pattern
//! - -0.0 → +0.0
//! - Object fields are hashed in stored (sorted) order, so key order in the
//!   source text does not matter

use crate::reader::JsonRef;
use crate::value::JsonValue;
use alloc::vec;
use alloc::vec::Vec;
use basalt_core::JsonType;
use core::hash::{Hash, Hasher};
use xxhash_rust::xxh64::Xxh64;

const SEED: u64 = 0;

// Canonical NaN bit pattern for deterministic hashing (quiet NaN)
const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

// Type tag prefixes prevent collisions (e.g., string "true" vs boolean true)
const H_ABSENT: u8 = 0x00;
const H_NULL: u8 = 0x01;
const H_BOOL: u8 = 0x02;
const H_NUMBER: u8 = 0x03;
const H_STRING: u8 = 0x04;
const H_ARRAY: u8 = 0x05;
const H_OBJECT: u8 = 0x06;
const H_KEY: u8 = 0x07;
const H_MIN_KEY: u8 = 0x0E;
const H_MAX_KEY: u8 = 0x0F;

enum Item<'a> {
    Node(JsonRef<'a>),
    Key(&'a str),
}

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_BITS
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

fn update_bytes(hasher: &mut Xxh64, tag: u8, bytes: &[u8]) {
    hasher.update(&[tag]);
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Hashes an encoded value's normalized content.
pub fn hash(value: JsonRef<'_>) -> u64 {
    let mut hasher = Xxh64::new(SEED);
    let mut stack = vec![Item::Node(value)];
    while let Some(item) = stack.pop() {
        let node = match item {
            Item::Key(key) => {
                update_bytes(&mut hasher, H_KEY, key.as_bytes());
                continue;
            }
            Item::Node(node) => node,
        };
        match node.json_type() {
            JsonType::Absent => hasher.update(&[H_ABSENT]),
            JsonType::Null => hasher.update(&[H_NULL]),
            JsonType::MinKey => hasher.update(&[H_MIN_KEY]),
            JsonType::MaxKey => hasher.update(&[H_MAX_KEY]),
            JsonType::Bool => hasher.update(&[H_BOOL, u8::from(node.as_bool() == Some(true))]),
            JsonType::Int | JsonType::Uint | JsonType::Double => {
                let bits = node.number().map_or(CANONICAL_NAN_BITS, |n| canonical_bits(n.as_f64()));
                hasher.update(&[H_NUMBER]);
                hasher.update(&bits.to_le_bytes());
            }
            JsonType::String => update_bytes(&mut hasher, H_STRING, node.str_bytes().unwrap_or_default()),
            JsonType::Array => {
                hasher.update(&[H_ARRAY]);
                hasher.update(&(node.len() as u64).to_le_bytes());
                let children: Vec<_> = node.elements().collect();
                stack.extend(children.into_iter().rev().map(Item::Node));
            }
            JsonType::Object => {
                hasher.update(&[H_OBJECT]);
                hasher.update(&(node.len() as u64).to_le_bytes());
                let fields: Vec<_> = node.fields().collect();
                for (key, child) in fields.into_iter().rev() {
                    stack.push(Item::Node(child));
                    stack.push(Item::Key(key));
                }
            }
        }
    }
    hasher.digest()
}

impl JsonValue {
    /// Returns the normalized 64-bit digest of this value.
    pub fn hash64(&self) -> u64 {
        hash(self.view())
    }
}

impl Hash for JsonValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash64());
    }
}
