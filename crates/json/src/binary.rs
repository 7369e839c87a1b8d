//! Binary encoding for JSON values.
//!
//! Every blob holds exactly one JSON document, or nothing at all (the absent
//! value). The encoding is self-describing and keeps enough offset metadata in
//! composite nodes to reach the k-th element or a named field without scanning
//! the preceding siblings.
//!
//! ## Encoding Format
//!
//! Each value is encoded as: `[type_tag: u8] [data...]`
//!
//! Type tags:
//! - 0x01: null
//! - 0x02: false
//! - 0x03: true
//! - 0x04: signed int (8 bytes, i64 little-endian)
//! - 0x05: unsigned int (8 bytes, u64 little-endian)
//! - 0x06: double (8 bytes, f64 little-endian)
//! - 0x07: string (varint length + UTF-8 bytes)
//! - 0x08: array (composite header + offset table + elements)
//! - 0x09: object (composite header + offset table + entries sorted by key)
//! - 0x1E / 0x1F: min key / max key sentinels, only ever a whole blob
//!
//! Composite header: `[tag] [byte size: u32] [count: u32] [offset: u32; count]`.
//! Offsets are relative to the first byte of the composite node. An object
//! entry is `[varint key length] [key bytes] [value]`, and entries are stored in
//! ascending byte order of their keys so lookups can binary search the offset
//! table. All fixed-width integers are little-endian.

use crate::error::EncodeError;
use alloc::vec;
use alloc::vec::Vec;
use basalt_core::JsonType;

pub(crate) const TAG_NULL: u8 = 0x01;
pub(crate) const TAG_FALSE: u8 = 0x02;
pub(crate) const TAG_TRUE: u8 = 0x03;
pub(crate) const TAG_INT: u8 = 0x04;
pub(crate) const TAG_UINT: u8 = 0x05;
pub(crate) const TAG_DOUBLE: u8 = 0x06;
pub(crate) const TAG_STRING: u8 = 0x07;
pub(crate) const TAG_ARRAY: u8 = 0x08;
pub(crate) const TAG_OBJECT: u8 = 0x09;
pub(crate) const TAG_MIN_KEY: u8 = 0x1E;
pub(crate) const TAG_MAX_KEY: u8 = 0x1F;

/// Tag, byte size and child count of a composite node.
pub(crate) const COMPOSITE_HEADER: usize = 9;
const OFFSET_WIDTH: usize = 4;
const NUMBER_WIDTH: usize = 9;

/// Default limit on array/object nesting, shared by parsing and blob validation.
///
/// `serde_json` refuses text nested 128 levels deep, so 127 is the deepest
/// document whose rendered text parses back.
pub const DEFAULT_MAX_DEPTH: usize = 127;

/// Maps a tag byte to its root type. Unknown tags read as absent.
pub(crate) fn tag_type(tag: u8) -> JsonType {
    match tag {
        TAG_NULL => JsonType::Null,
        TAG_FALSE | TAG_TRUE => JsonType::Bool,
        TAG_INT => JsonType::Int,
        TAG_UINT => JsonType::Uint,
        TAG_DOUBLE => JsonType::Double,
        TAG_STRING => JsonType::String,
        TAG_ARRAY => JsonType::Array,
        TAG_OBJECT => JsonType::Object,
        TAG_MIN_KEY => JsonType::MinKey,
        TAG_MAX_KEY => JsonType::MaxKey,
        _ => JsonType::Absent,
    }
}

/// Encodes a varint (variable-length integer).
fn encode_varint(value: usize, out: &mut Vec<u8>) {
    let mut v = value;
    loop {
        let mut byte = (v & 0x7F) as u8;
        v >>= 7;
        if v != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if v == 0 {
            break;
        }
    }
}

/// Decodes a varint from the buffer. Returns None on truncation or overflow.
pub(crate) fn decode_varint(data: &[u8], pos: &mut usize) -> Option<usize> {
    let mut result = 0usize;
    let mut shift = 0u32;
    loop {
        let byte = *data.get(*pos)?;
        *pos += 1;
        if shift >= usize::BITS {
            return None;
        }
        result |= ((byte & 0x7F) as usize) << shift;
        if byte & 0x80 == 0 {
            return Some(result);
        }
        shift += 7;
    }
}

pub(crate) fn read_u32(data: &[u8], pos: usize) -> Option<usize> {
    let bytes = data.get(pos..pos.checked_add(4)?)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?) as usize)
}

pub(crate) fn read_u64(data: &[u8], pos: usize) -> Option<u64> {
    let bytes = data.get(pos..pos.checked_add(8)?)?;
    Some(u64::from_le_bytes(bytes.try_into().ok()?))
}

/// Byte length of the value starting at `data[0]`, read from its header only.
pub(crate) fn node_len(data: &[u8]) -> Option<usize> {
    match *data.first()? {
        TAG_NULL | TAG_FALSE | TAG_TRUE | TAG_MIN_KEY | TAG_MAX_KEY => Some(1),
        TAG_INT | TAG_UINT | TAG_DOUBLE => Some(NUMBER_WIDTH),
        TAG_STRING => {
            let mut pos = 1;
            let len = decode_varint(data, &mut pos)?;
            pos.checked_add(len)
        }
        TAG_ARRAY | TAG_OBJECT => read_u32(data, 1),
        _ => None,
    }
}

/// Position of an open composite node inside the encoder buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Composite {
    start: usize,
    count: usize,
}

/// Append-only writer producing one encoded value.
#[derive(Debug, Default)]
pub(crate) struct Encoder {
    out: Vec<u8>,
}

impl Encoder {
    pub(crate) fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub(crate) fn null(&mut self) {
        self.out.push(TAG_NULL);
    }

    pub(crate) fn bool(&mut self, value: bool) {
        self.out.push(if value { TAG_TRUE } else { TAG_FALSE });
    }

    pub(crate) fn int(&mut self, value: i64) {
        self.out.push(TAG_INT);
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn uint(&mut self, value: u64) {
        self.out.push(TAG_UINT);
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn double(&mut self, value: f64) {
        self.out.push(TAG_DOUBLE);
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn string(&mut self, value: &str) {
        self.out.push(TAG_STRING);
        encode_varint(value.len(), &mut self.out);
        self.out.extend_from_slice(value.as_bytes());
    }

    /// Writes an object key. Must directly precede the entry's value.
    pub(crate) fn key(&mut self, key: &str) {
        encode_varint(key.len(), &mut self.out);
        self.out.extend_from_slice(key.as_bytes());
    }

    /// Opens an array or object with `count` children and a zeroed offset table.
    pub(crate) fn begin_composite(&mut self, tag: u8, count: usize) -> Result<Composite, EncodeError> {
        let count32 = u32::try_from(count).map_err(|_| EncodeError::TooLarge)?;
        let start = self.out.len();
        self.out.push(tag);
        self.out.extend_from_slice(&[0; 4]);
        self.out.extend_from_slice(&count32.to_le_bytes());
        self.out.resize(self.out.len() + count * OFFSET_WIDTH, 0);
        Ok(Composite { start, count })
    }

    /// Records that child `index` of `node` starts at the current write position.
    pub(crate) fn mark_child(&mut self, node: Composite, index: usize) -> Result<(), EncodeError> {
        debug_assert!(index < node.count);
        let offset = self.relative(node)?;
        let at = node.start + COMPOSITE_HEADER + index * OFFSET_WIDTH;
        self.out[at..at + OFFSET_WIDTH].copy_from_slice(&offset.to_le_bytes());
        Ok(())
    }

    /// Closes `node`, patching its byte size.
    pub(crate) fn finish_composite(&mut self, node: Composite) -> Result<(), EncodeError> {
        let size = self.relative(node)?;
        self.out[node.start + 1..node.start + 5].copy_from_slice(&size.to_le_bytes());
        Ok(())
    }

    fn relative(&self, node: Composite) -> Result<u32, EncodeError> {
        u32::try_from(self.out.len() - node.start).map_err(|_| EncodeError::TooLarge)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.out
    }
}

/// Encodes a single sentinel blob.
pub(crate) fn sentinel(tag: u8) -> Vec<u8> {
    debug_assert!(tag == TAG_MIN_KEY || tag == TAG_MAX_KEY);
    vec![tag]
}

/// Checks that `data` is empty or exactly one well-formed value.
///
/// Walks the blob with an explicit stack, so adversarial nesting costs heap,
/// not call stack. Composite nesting beyond `max_depth` is rejected.
pub(crate) fn validate(data: &[u8], max_depth: usize) -> Result<(), &'static str> {
    if data.is_empty() {
        return Ok(());
    }
    let root_len = node_len(data).ok_or("unknown tag or truncated header")?;
    if root_len != data.len() {
        return Err("root value does not span the blob");
    }
    if matches!(data[0], TAG_MIN_KEY | TAG_MAX_KEY) {
        return Ok(());
    }

    let mut stack: Vec<(&[u8], usize)> = vec![(data, 0)];
    while let Some((node, depth)) = stack.pop() {
        match node[0] {
            TAG_NULL | TAG_FALSE | TAG_TRUE | TAG_INT | TAG_UINT | TAG_DOUBLE => {}
            TAG_STRING => {
                let mut pos = 1;
                let len = decode_varint(node, &mut pos).ok_or("truncated string length")?;
                let bytes = pos
                    .checked_add(len)
                    .and_then(|end| node.get(pos..end))
                    .ok_or("truncated string")?;
                core::str::from_utf8(bytes).map_err(|_| "string is not valid UTF-8")?;
            }
            tag @ (TAG_ARRAY | TAG_OBJECT) => {
                let depth = depth + 1;
                if depth > max_depth {
                    return Err("nesting depth exceeds limit");
                }
                validate_composite(node, tag == TAG_OBJECT, depth, &mut stack)?;
            }
            _ => return Err("unexpected tag inside document"),
        }
    }
    Ok(())
}

fn validate_composite<'a>(
    node: &'a [u8],
    is_object: bool,
    depth: usize,
    stack: &mut Vec<(&'a [u8], usize)>,
) -> Result<(), &'static str> {
    let count = read_u32(node, 5).ok_or("truncated composite header")?;
    let table_end = count
        .checked_mul(OFFSET_WIDTH)
        .and_then(|t| t.checked_add(COMPOSITE_HEADER))
        .filter(|&end| end <= node.len())
        .ok_or("offset table exceeds node")?;

    let mut expected_start = table_end;
    let mut prev_key: Option<&[u8]> = None;
    for index in 0..count {
        let start = read_u32(node, COMPOSITE_HEADER + index * OFFSET_WIDTH).ok_or("truncated offset")?;
        let end = if index + 1 < count {
            read_u32(node, COMPOSITE_HEADER + (index + 1) * OFFSET_WIDTH).ok_or("truncated offset")?
        } else {
            node.len()
        };
        if start != expected_start || end < start || end > node.len() {
            return Err("child offsets out of order");
        }
        expected_start = end;

        let mut child = &node[start..end];
        if is_object {
            let mut pos = 0;
            let key_len = decode_varint(child, &mut pos).ok_or("truncated key length")?;
            let key = pos
                .checked_add(key_len)
                .and_then(|end| child.get(pos..end))
                .ok_or("truncated key")?;
            core::str::from_utf8(key).map_err(|_| "key is not valid UTF-8")?;
            if prev_key.is_some_and(|prev| prev >= key) {
                return Err("object keys are not strictly ascending");
            }
            prev_key = Some(key);
            child = &child[pos + key_len..];
        }
        if node_len(child) != Some(child.len()) {
            return Err("child length disagrees with offsets");
        }
        stack.push((child, depth));
    }
    if expected_start != node.len() {
        return Err("trailing bytes after last child");
    }
    Ok(())
}
