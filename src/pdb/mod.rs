//! Core Palm database decoding pipeline.
//!
//! Decoding runs in explicit stages over one immutable buffer:
//! [`parse_header`], then [`parse_app_info`], then [`parse_records`].
//! [`decode`] and [`decode_with_options`] run all of them.

pub mod bits;
pub mod format;
pub mod records;
pub mod types;
mod utils;

use log::{debug, info, warn};

use format::{appinfo, header, index};
use records::RecordContext;
pub use format::header::{decode_timestamp, MAC_EPOCH_OFFSET};
pub use types::error::{PdbError, Result};
pub use types::models::*;
pub use types::records::*;
pub use utils::{default_encoding, parse_encoding};

/// Decode a whole database with default options.
pub fn decode(buffer: &[u8]) -> Result<Database> {
    decode_with_options(buffer, &DecodeOptions::default())
}

/// Decode a whole database.
///
/// # Errors
/// Returns an error if:
/// - The header is shorter than 80 bytes or its offsets are inconsistent
/// - The record index does not fit in the buffer
/// - An address book has no label table and none was supplied
///
/// Errors inside individual record bodies do not fail the decode; they are
/// stored on the affected [`RecordEntry`].
pub fn decode_with_options(buffer: &[u8], options: &DecodeOptions) -> Result<Database> {
    let header = parse_header_with(buffer, options)?;
    let app_info = parse_app_info(buffer, &header, options)?;
    let records = parse_records(buffer, &header, &app_info, options)?;

    let sort_info = header
        .sortinfo_range
        .clone()
        .map(|range| buffer[range].to_vec());

    let failed = records.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Database '{}' decoded: {} records ({} failed), {} categories",
        header.name,
        records.len(),
        failed,
        app_info.categories.len()
    );

    Ok(Database {
        header,
        app_info,
        sort_info,
        records,
    })
}

/// Decode the 80-byte header using the default text encoding.
pub fn parse_header(buffer: &[u8]) -> Result<Header> {
    parse_header_with(buffer, &DecodeOptions::default())
}

/// Decode the 80-byte header using the encoding from `options`.
pub fn parse_header_with(buffer: &[u8], options: &DecodeOptions) -> Result<Header> {
    header::parse(buffer, options.encoding)
}

/// Decode the appinfo block: categories and, for address books, labels.
pub fn parse_app_info(buffer: &[u8], header: &Header, options: &DecodeOptions) -> Result<AppInfo> {
    appinfo::parse(buffer, header, options.encoding, options.labels.is_none())
}

/// Decode the record index and every record body.
///
/// Always yields exactly `header.record_count` entries once the index itself
/// is valid.
pub fn parse_records(
    buffer: &[u8],
    header: &Header,
    app_info: &AppInfo,
    options: &DecodeOptions,
) -> Result<Vec<RecordEntry>> {
    let entries = index::parse(buffer, header)?;
    let creator = header.creator();
    let ctx = RecordContext {
        encoding: options.encoding,
        labels: options.labels.as_ref().or(app_info.labels.as_ref()),
    };
    debug!("Decoding {} records as {}", entries.len(), creator);

    let records = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| decode_entry(i, entry, &buffer[entry.range()], creator, app_info, &ctx))
        .collect();
    Ok(records)
}

fn decode_entry(
    position: usize,
    entry: &IndexEntry,
    bytes: &[u8],
    creator: Creator,
    app_info: &AppInfo,
    ctx: &RecordContext<'_>,
) -> RecordEntry {
    let slot = entry.attributes.category;
    let category = app_info.categories.get(slot).map(str::to_string);

    let record = match category {
        Some(_) => records::decode(creator, bytes, ctx),
        None => Err(PdbError::UnknownEnumValue {
            field: "category slot",
            value: u32::from(slot),
        }),
    };
    if let Err(e) = &record {
        warn!("Record {} at offset {} failed to decode: {}", position, entry.offset, e);
    }

    RecordEntry {
        offset: entry.offset,
        length: entry.length,
        attributes: entry.attributes,
        category,
        record,
    }
}
