//! Record index parsing.
//!
//! The index sits at `78 + recordlist_offset` and holds one 8-byte entry per
//! record:
//!
//! ```text
//! [4 bytes] data offset (big-endian u32)
//! [1 byte ] attributes: deleted, dirty, busy, secret, 4-bit category slot
//! [3 bytes] unique id (unused)
//! ```
//!
//! A record's length runs up to the next record's offset; the last record
//! runs to the end of the buffer.

use log::{debug, trace};

use crate::pdb::bits::BitReader;
use crate::pdb::types::{
    error::{PdbError, Result},
    models::{Header, IndexEntry, RecordAttributes},
};
use crate::pdb::utils;

const INDEX_BASE: usize = 78;
const ENTRY_SIZE: usize = 8;

/// Parses the record index described by `header`.
pub fn parse(buffer: &[u8], header: &Header) -> Result<Vec<IndexEntry>> {
    let count = header.record_count as usize;
    if count == 0 {
        debug!("Record index: empty");
        return Ok(Vec::new());
    }
    let start = INDEX_BASE + header.recordlist_offset as usize;
    let raw = utils::take(buffer, start, count * ENTRY_SIZE, "record index")?;
    let index_end = start + raw.len();
    debug!("Record index: {} entries at {}..{}", count, start, index_end);

    let mut offsets = Vec::with_capacity(count);
    let mut attributes = Vec::with_capacity(count);
    for entry in raw.chunks_exact(ENTRY_SIZE) {
        let reader = BitReader::new(entry);
        offsets.push(reader.u32_at(0)? as usize);
        attributes.push(parse_attributes(reader.sub(4, 1)?)?);
    }

    if let Some(&first) = offsets.first() {
        if first < index_end {
            return Err(PdbError::TruncatedInput {
                context: "record index",
                needed: index_end,
                available: first,
            });
        }
    }

    let mut entries = Vec::with_capacity(count);
    for (i, (&offset, attributes)) in offsets.iter().zip(attributes).enumerate() {
        let next = offsets.get(i + 1).copied().unwrap_or(buffer.len());
        if offset > buffer.len() || next < offset {
            return Err(PdbError::TruncatedInput {
                context: "record data",
                needed: offset.max(next),
                available: if offset > buffer.len() { buffer.len() } else { next },
            });
        }
        let length = next - offset;
        trace!("Record {}: offset={}, length={}, {:?}", i, offset, length, attributes);
        entries.push(IndexEntry {
            offset,
            length,
            attributes,
        });
    }

    Ok(entries)
}

fn parse_attributes(reader: BitReader<'_>) -> Result<RecordAttributes> {
    Ok(RecordAttributes {
        deleted: reader.bit(0)?,
        dirty: reader.bit(1)?,
        busy: reader.bit(2)?,
        secret: reader.bit(3)?,
        category: reader.uint(4, 8)? as u8,
    })
}
