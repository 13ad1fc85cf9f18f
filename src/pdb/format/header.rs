//! Palm database header parsing and section boundary resolution.
//!
//! This module handles:
//! - Decoding the fixed 80-byte header
//! - Converting Mac-epoch timestamps to Unix time
//! - Resolving where the appinfo and sortinfo blocks end

use std::ops::Range;

use encoding_rs::Encoding;
use log::{debug, info, trace};

use crate::pdb::bits::BitReader;
use crate::pdb::types::{
    error::{PdbError, Result},
    models::{DbAttributes, Header, Timestamp},
};
use crate::pdb::utils;

/// Seconds between 1904-01-01 (Mac epoch) and 1970-01-01 (Unix epoch).
pub const MAC_EPOCH_OFFSET: u32 = 2_082_844_800;

/// Convert a stored Mac-epoch value to Unix time.
///
/// Values at or before the Unix epoch are treated as unset.
pub fn decode_timestamp(raw: u32) -> Option<Timestamp> {
    if raw > MAC_EPOCH_OFFSET {
        Some(Timestamp(i64::from(raw - MAC_EPOCH_OFFSET)))
    } else {
        None
    }
}

/// Parses the database header from the start of `buffer`.
///
/// # Header Structure
/// ```text
/// [ 0..32] name, NUL-terminated
/// [32..34] attributes            [34..36] format version
/// [36..40] created               [40..44] modified
/// [44..48] backed up             [48..52] modification number
/// [52..56] appinfo offset        [56..60] sortinfo offset
/// [60..64] type code             [64..68] creator code
/// [68..72] unique id seed        [72..76] next record list (unused)
/// [76..78] record count          [78..80] record list offset
/// ```
pub fn parse(buffer: &[u8], encoding: &'static Encoding) -> Result<Header> {
    let raw = utils::take(buffer, 0, Header::SIZE, "database header")?;
    let reader = BitReader::new(raw);
    trace!("Header bytes: {} of {} total", raw.len(), buffer.len());

    // Step 1: Name and attributes
    let name = utils::decode_text(utils::fixed_cstr(&raw[0..32]), encoding);
    let attributes = parse_attributes(reader.sub(32, 2)?)?;
    let format_version = reader.u16_at(34)?;

    // Step 2: Timestamps
    let created = decode_timestamp(reader.u32_at(36)?);
    let modified = decode_timestamp(reader.u32_at(40)?);
    let backed_up = decode_timestamp(reader.u32_at(44)?);
    let modification_number = reader.u32_at(48)?;

    // Step 3: Section offsets and codes
    let appinfo_offset = reader.u32_at(52)?;
    let sortinfo_offset = reader.u32_at(56)?;
    let mut type_code = [0u8; 4];
    type_code.copy_from_slice(&raw[60..64]);
    let mut creator_code = [0u8; 4];
    creator_code.copy_from_slice(&raw[64..68]);
    let unique_id_seed = reader.u32_at(68)?;
    let record_count = reader.u16_at(76)?;
    let recordlist_offset = reader.u16_at(78)?;

    // Step 4: Resolve section boundaries
    let (appinfo_range, sortinfo_range) = resolve_sections(
        buffer.len(),
        appinfo_offset,
        sortinfo_offset,
        recordlist_offset,
    )?;
    debug!(
        "Sections: appinfo={:?}, sortinfo={:?}, record list at +{}",
        appinfo_range, sortinfo_range, recordlist_offset
    );

    let header = Header {
        name,
        attributes,
        format_version,
        created,
        modified,
        backed_up,
        modification_number,
        appinfo_offset,
        sortinfo_offset,
        type_code,
        creator_code,
        unique_id_seed,
        record_count,
        recordlist_offset,
        appinfo_range,
        sortinfo_range,
    };

    info!(
        "Header parsed: name='{}', creator={}, version={}, records={}",
        header.name,
        header.creator(),
        header.format_version,
        header.record_count
    );
    Ok(header)
}

fn parse_attributes(reader: BitReader<'_>) -> Result<DbAttributes> {
    Ok(DbAttributes {
        busy: reader.bit(0)?,
        syncable: !reader.bit(8)?,
        protected: reader.bit(9)?,
        reset: reader.bit(10)?,
        rewritable: reader.bit(11)?,
        archive: reader.bit(12)?,
        dirty: reader.bit(13)?,
        readonly: reader.bit(14)?,
        resource: reader.bit(15)?,
    })
}

/// Works out the byte ranges of the appinfo and sortinfo blocks.
///
/// Each block ends where the next present section begins, or at the end of
/// the buffer when nothing follows it.
fn resolve_sections(
    len: usize,
    appinfo_offset: u32,
    sortinfo_offset: u32,
    recordlist_offset: u16,
) -> Result<(Option<Range<usize>>, Option<Range<usize>>)> {
    let appinfo = appinfo_offset as usize;
    let sortinfo = sortinfo_offset as usize;
    let recordlist = recordlist_offset as usize;

    for (label, offset) in [
        ("appinfo", appinfo),
        ("sortinfo", sortinfo),
        ("record list", recordlist),
    ] {
        if offset > len {
            return Err(PdbError::MalformedHeader(format!(
                "{} offset {} exceeds file length {}",
                label, offset, len
            )));
        }
    }

    let appinfo_range = if appinfo != 0 {
        let end = [sortinfo, recordlist]
            .into_iter()
            .find(|&o| o != 0)
            .unwrap_or(len);
        Some(checked_range("appinfo", appinfo, end)?)
    } else {
        None
    };

    let sortinfo_range = if sortinfo != 0 {
        let end = if recordlist != 0 { recordlist } else { len };
        Some(checked_range("sortinfo", sortinfo, end)?)
    } else {
        None
    };

    Ok((appinfo_range, sortinfo_range))
}

fn checked_range(label: &str, start: usize, end: usize) -> Result<Range<usize>> {
    if end < start {
        return Err(PdbError::MalformedHeader(format!(
            "{} block ends at {} before it starts at {}",
            label, end, start
        )));
    }
    Ok(start..end)
}
