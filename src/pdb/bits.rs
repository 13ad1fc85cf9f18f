//! MSB-first bit field extraction.
//!
//! Palm OS packs most small fields (dates, attribute flags, nibble arrays)
//! into big-endian words. Bits are numbered from the most significant bit of
//! the first byte, so bit 0 is `0x80` of byte 0 and bit 15 is `0x01` of
//! byte 1. Spans may cross byte boundaries freely.
//!
//! Everything that needs a sub-byte field goes through [`BitReader`]; the
//! decoders above it only ever see named integers and booleans.

use byteorder::{BigEndian, ByteOrder};

use crate::pdb::types::error::{PdbError, Result};

/// Returns the unsigned integer formed by bits `start..end` of `buffer`.
///
/// Spans wider than 32 bits, reversed spans, and spans past the end of the
/// buffer fail with [`PdbError::OutOfRange`].
pub fn uint(buffer: &[u8], start: usize, end: usize) -> Result<u32> {
    let available = buffer.len() * 8;
    if start > end || end > available || end - start > 32 {
        return Err(PdbError::OutOfRange { start, end, available });
    }

    let mut value: u32 = 0;
    for index in start..end {
        let byte = buffer[index / 8];
        let bit = (byte >> (7 - index % 8)) & 1;
        value = (value << 1) | u32::from(bit);
    }
    Ok(value)
}

/// Returns bit `index` of `buffer` as a boolean.
pub fn bit(buffer: &[u8], index: usize) -> Result<bool> {
    uint(buffer, index, index + 1).map(|v| v == 1)
}

/// A borrowed view over a byte buffer with bit-level and byte-aligned accessors.
#[derive(Debug, Clone, Copy)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bits `start..end`, MSB-first.
    pub fn uint(&self, start: usize, end: usize) -> Result<u32> {
        uint(self.bytes, start, end)
    }

    pub fn bit(&self, index: usize) -> Result<bool> {
        bit(self.bytes, index)
    }

    /// The byte at `offset`.
    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        self.slice(offset, 1).map(|b| b[0])
    }

    /// Big-endian `u16` starting at byte `offset`.
    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        self.slice(offset, 2).map(BigEndian::read_u16)
    }

    /// Big-endian `u32` starting at byte `offset`.
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.slice(offset, 4).map(BigEndian::read_u32)
    }

    /// A sub-reader over `len` bytes starting at `offset`, so that bit 0 of
    /// the result is the MSB of `bytes[offset]`.
    pub fn sub(&self, offset: usize, len: usize) -> Result<BitReader<'a>> {
        self.slice(offset, len).map(BitReader::new)
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset.saturating_add(len);
        self.bytes.get(offset..end).ok_or(PdbError::OutOfRange {
            start: offset * 8,
            end: end.saturating_mul(8),
            available: self.bytes.len() * 8,
        })
    }
}
