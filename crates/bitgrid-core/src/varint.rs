//! Unsigned LEB128 variable-length integer codec.
//!
//! Each integer is emitted as a sequence of bytes holding 7 value bits,
//! least significant group first; the high bit of every byte except the
//! last is set. Small values cost one byte, `u64::MAX` costs ten.

use std::error::Error;
use std::fmt;

/// Append the LEB128 encoding of `value` to `out`.
pub fn write_u64(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// A malformed varint in the input byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarintError {
    /// The input ended in the middle of an integer (or where one was
    /// required).
    Truncated {
        /// Byte offset at which the integer started.
        offset: usize,
    },
    /// The encoding does not fit in 64 bits.
    Overflow {
        /// Byte offset at which the integer started.
        offset: usize,
    },
}

impl fmt::Display for VarintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset } => {
                write!(f, "truncated varint at byte offset {offset}")
            }
            Self::Overflow { offset } => {
                write!(f, "varint at byte offset {offset} overflows u64")
            }
        }
    }
}

impl Error for VarintError {}

/// Reads a byte slice as a sequence of LEB128 integers, one at a time.
///
/// # Examples
///
/// ```
/// use bitgrid_core::varint::{self, VarintReader};
///
/// let mut bytes = Vec::new();
/// varint::write_u64(&mut bytes, 3);
/// varint::write_u64(&mut bytes, 300);
///
/// let mut reader = VarintReader::new(&bytes);
/// assert_eq!(reader.next_u64().unwrap(), 3);
/// assert_eq!(reader.next_u64().unwrap(), 300);
/// assert!(reader.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct VarintReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> VarintReader<'a> {
    /// Start reading at the front of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Decode the next integer.
    pub fn next_u64(&mut self) -> Result<u64, VarintError> {
        let start = self.pos;
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            if shift > 63 {
                return Err(VarintError::Overflow { offset: start });
            }
            let byte = *self
                .bytes
                .get(self.pos)
                .ok_or(VarintError::Truncated { offset: start })?;
            self.pos += 1;
            let group = (byte & 0x7F) as u64;
            // The tenth byte may only contribute the lowest bit of its group.
            if shift == 63 && group > 1 {
                return Err(VarintError::Overflow { offset: start });
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos == self.bytes.len()
    }
}
