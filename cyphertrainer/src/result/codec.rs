// Copyright (c) 2024-2025 CypherTrainer Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Expected-result codec
//!
//! Row sequences are stored in a compact, self-describing binary format so an
//! exercise exported by one build can be validated by any other.
//!
//! Binary Format (little-endian):
//! - Magic (4 bytes): RESULT_MAGIC
//! - Version (2 bytes): RESULT_VERSION
//! - Row count (4 bytes): u32
//! - Rows: field count (u32) followed by (key, value) pairs
//! - Checksum (4 bytes): CRC32 over every preceding byte
//!
//! Strings are a u32 byte length followed by UTF-8 bytes. Every value starts
//! with a one-byte type tag (see [`ValueTag`]).

use super::error::{CodecError, CodecResult};
use super::row::Row;
use super::value::Value;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::BTreeMap;

/// Magic number identifying an expected-result payload
const RESULT_MAGIC: u32 = 0x5352_5443;
/// Current payload format version
const RESULT_VERSION: u16 = 1;
/// Maximum nesting of lists and maps
const MAX_DEPTH: usize = 64;
/// Header (magic + version + row count) plus trailing checksum
const MIN_PAYLOAD_SIZE: usize = 4 + 2 + 4 + 4;

/// Type tags for the binary format
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueTag {
    Null = 0x00,
    Boolean = 0x01,
    Integer = 0x02,
    Float = 0x03,
    String = 0x04,
    List = 0x05,
    Map = 0x06,
}

impl ValueTag {
    fn from_byte(byte: u8) -> CodecResult<Self> {
        match byte {
            0x00 => Ok(ValueTag::Null),
            0x01 => Ok(ValueTag::Boolean),
            0x02 => Ok(ValueTag::Integer),
            0x03 => Ok(ValueTag::Float),
            0x04 => Ok(ValueTag::String),
            0x05 => Ok(ValueTag::List),
            0x06 => Ok(ValueTag::Map),
            other => Err(CodecError::CorruptPayload(format!(
                "unknown type tag 0x{:02x}",
                other
            ))),
        }
    }
}

/// Encode an ordered row sequence
pub fn encode(rows: &[Row]) -> CodecResult<Vec<u8>> {
    let mut buffer = Vec::with_capacity(64 + rows.len() * 32);

    buffer.extend_from_slice(&RESULT_MAGIC.to_le_bytes());
    buffer.extend_from_slice(&RESULT_VERSION.to_le_bytes());
    write_len(&mut buffer, rows.len())?;

    for row in rows {
        write_entries(&mut buffer, &row.values, 0)?;
    }

    let checksum = crc32fast::hash(&buffer);
    buffer.extend_from_slice(&checksum.to_le_bytes());

    Ok(buffer)
}

/// Decode a payload produced by [`encode`]
pub fn decode(data: &[u8]) -> CodecResult<Vec<Row>> {
    if data.len() < MIN_PAYLOAD_SIZE {
        return Err(CodecError::CorruptPayload(format!(
            "payload too small ({} bytes)",
            data.len()
        )));
    }

    let (body, checksum_bytes) = data.split_at(data.len() - 4);
    let mut reader = Reader::new(body);

    let magic = reader.read_u32()?;
    if magic != RESULT_MAGIC {
        return Err(CodecError::CorruptPayload("invalid magic number".to_string()));
    }

    let version = reader.read_u16()?;
    if version != RESULT_VERSION {
        return Err(CodecError::CorruptPayload(format!(
            "unsupported format version {}",
            version
        )));
    }

    // Structure is checked before the checksum so truncation and bad tags are
    // reported as such rather than as a generic checksum failure.
    let row_count = reader.read_len()?;
    let mut rows = Vec::with_capacity(row_count.min(reader.remaining()));
    for _ in 0..row_count {
        rows.push(Row::from_values(reader.read_entries(0)?));
    }

    if reader.remaining() != 0 {
        return Err(CodecError::CorruptPayload(format!(
            "{} trailing bytes after last row",
            reader.remaining()
        )));
    }

    let expected_checksum = u32::from_le_bytes([
        checksum_bytes[0],
        checksum_bytes[1],
        checksum_bytes[2],
        checksum_bytes[3],
    ]);
    if crc32fast::hash(body) != expected_checksum {
        return Err(CodecError::CorruptPayload("checksum mismatch".to_string()));
    }

    Ok(rows)
}

fn write_len(buffer: &mut Vec<u8>, len: usize) -> CodecResult<()> {
    let len = u32::try_from(len)
        .map_err(|_| CodecError::UnsupportedType(format!("collection of {} elements", len)))?;
    buffer.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

fn write_str(buffer: &mut Vec<u8>, s: &str) -> CodecResult<()> {
    write_len(buffer, s.len())?;
    buffer.extend_from_slice(s.as_bytes());
    Ok(())
}

fn write_entries(
    buffer: &mut Vec<u8>,
    entries: &BTreeMap<String, Value>,
    depth: usize,
) -> CodecResult<()> {
    write_len(buffer, entries.len())?;
    for (key, value) in entries {
        write_str(buffer, key)?;
        write_value(buffer, value, depth)?;
    }
    Ok(())
}

fn write_value(buffer: &mut Vec<u8>, value: &Value, depth: usize) -> CodecResult<()> {
    if depth > MAX_DEPTH {
        return Err(CodecError::UnsupportedType(format!(
            "value nested deeper than {} levels",
            MAX_DEPTH
        )));
    }

    match value {
        Value::Null => buffer.push(ValueTag::Null as u8),
        Value::Boolean(b) => {
            buffer.push(ValueTag::Boolean as u8);
            buffer.push(u8::from(*b));
        }
        Value::Integer(n) => {
            buffer.push(ValueTag::Integer as u8);
            buffer.extend_from_slice(&n.to_le_bytes());
        }
        Value::Float(f) => {
            buffer.push(ValueTag::Float as u8);
            buffer.extend_from_slice(&f.to_bits().to_le_bytes());
        }
        Value::String(s) => {
            buffer.push(ValueTag::String as u8);
            write_str(buffer, s)?;
        }
        Value::List(items) => {
            buffer.push(ValueTag::List as u8);
            write_len(buffer, items.len())?;
            for item in items {
                write_value(buffer, item, depth + 1)?;
            }
        }
        Value::Map(entries) => {
            buffer.push(ValueTag::Map as u8);
            write_entries(buffer, entries, depth + 1)?;
        }
        Value::Node(_) | Value::Relationship(_) => {
            return Err(CodecError::UnsupportedType(format!(
                "{} values cannot be stored; return scalar properties instead",
                value.type_name()
            )));
        }
    }

    Ok(())
}

/// Bounds-checked cursor over a payload
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::CorruptPayload(format!(
                "truncated payload: needed {} bytes at offset {}, {} available",
                len,
                self.offset,
                self.remaining()
            )));
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> CodecResult<u16> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    fn read_u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    fn read_len(&mut self) -> CodecResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    fn read_str(&mut self) -> CodecResult<String> {
        let len = self.read_len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| CodecError::CorruptPayload("invalid UTF-8 in string".to_string()))
    }

    fn read_entries(&mut self, depth: usize) -> CodecResult<BTreeMap<String, Value>> {
        let count = self.read_len()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = self.read_str()?;
            let value = self.read_value(depth)?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(CodecError::CorruptPayload(format!(
                    "duplicate field '{}'",
                    key
                )));
            }
        }
        Ok(entries)
    }

    fn read_value(&mut self, depth: usize) -> CodecResult<Value> {
        if depth > MAX_DEPTH {
            return Err(CodecError::CorruptPayload(format!(
                "value nested deeper than {} levels",
                MAX_DEPTH
            )));
        }

        let value = match ValueTag::from_byte(self.read_u8()?)? {
            ValueTag::Null => Value::Null,
            ValueTag::Boolean => match self.read_u8()? {
                0 => Value::Boolean(false),
                1 => Value::Boolean(true),
                other => {
                    return Err(CodecError::CorruptPayload(format!(
                        "invalid boolean byte 0x{:02x}",
                        other
                    )))
                }
            },
            ValueTag::Integer => Value::Integer(i64::from_le_bytes(self.take_array()?)),
            ValueTag::Float => Value::Float(f64::from_bits(u64::from_le_bytes(self.take_array()?))),
            ValueTag::String => Value::String(self.read_str()?),
            ValueTag::List => {
                let count = self.read_len()?;
                let mut items = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    items.push(self.read_value(depth + 1)?);
                }
                Value::List(items)
            }
            ValueTag::Map => Value::Map(self.read_entries(depth + 1)?),
        };

        Ok(value)
    }
}

/// Serialized snapshot of the rows an exercise's solution produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedResult {
    bytes: Vec<u8>,
}

impl ExpectedResult {
    /// Wrap raw payload bytes without inspecting them
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encode a row sequence into a snapshot
    pub fn from_rows(rows: &[Row]) -> CodecResult<Self> {
        Ok(Self {
            bytes: encode(rows)?,
        })
    }

    /// Parse the base-64 text form used in persisted exercise records
    pub fn from_base64(text: &str) -> CodecResult<Self> {
        STANDARD
            .decode(text.trim())
            .map(Self::from_bytes)
            .map_err(|e| CodecError::CorruptPayload(format!("invalid base-64: {}", e)))
    }

    /// Base-64 text form for persisted exercise records
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Decode the snapshot back into rows
    pub fn decode(&self) -> CodecResult<Vec<Row>> {
        decode(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
