//! Appinfo block decoding: the standard category table and, for the address
//! book, its field label table.
//!
//! ```text
//! [  0..  2] renamed-categories bitfield (ignored)
//! [  2..258] 16 category names, 16 bytes each, NUL-terminated
//! [258..282] category ids and last id (ignored)
//! [282..634] address book only: 22 field labels, 16 bytes each
//! ```

use encoding_rs::Encoding;
use log::debug;

use crate::pdb::types::{
    error::{PdbError, Result},
    models::{AppInfo, Categories, Creator, FieldNames, Header},
};
use crate::pdb::utils;

const NAME_WIDTH: usize = 16;
const CATEGORY_TABLE_OFFSET: usize = 2;
const LABEL_TABLE_OFFSET: usize = 282;

/// Decode the appinfo block described by `header`.
///
/// When `labels_required` is set, an `addr` database without a full label
/// table fails with `MalformedHeader`.
pub fn parse(
    buffer: &[u8],
    header: &Header,
    encoding: &'static Encoding,
    labels_required: bool,
) -> Result<AppInfo> {
    let block = match &header.appinfo_range {
        Some(range) => &buffer[range.clone()],
        None => &[][..],
    };
    debug!("Appinfo block: {} bytes", block.len());

    let categories = parse_categories(block, encoding);
    debug!("Categories: {} named slots", categories.len());

    let labels = if header.creator() == Creator::Address {
        match parse_labels(block, encoding) {
            Some(labels) => Some(labels),
            None if labels_required => {
                return Err(PdbError::MalformedHeader(format!(
                    "address book appinfo has no label table ({} bytes, need {})",
                    block.len(),
                    LABEL_TABLE_OFFSET + FieldNames::COUNT * NAME_WIDTH
                )));
            }
            None => None,
        }
    } else {
        None
    };

    Ok(AppInfo { categories, labels })
}

/// Decode the 16 category slots at the start of an appinfo block.
///
/// Slots that fall past the end of a short block are treated as empty.
pub fn parse_categories(block: &[u8], encoding: &'static Encoding) -> Categories {
    let slots = (0..Categories::SLOTS).filter_map(|slot| {
        let start = CATEGORY_TABLE_OFFSET + slot * NAME_WIDTH;
        let end = (start + NAME_WIDTH).min(block.len());
        let field = block.get(start..end)?;
        let name = utils::decode_text(utils::fixed_cstr(field), encoding);
        Some((slot as u8, name))
    });
    Categories::from_slots(slots)
}

/// Decode the address-book label table, if the block is long enough to hold it.
pub fn parse_labels(block: &[u8], encoding: &'static Encoding) -> Option<FieldNames> {
    let table = block.get(LABEL_TABLE_OFFSET..LABEL_TABLE_OFFSET + FieldNames::COUNT * NAME_WIDTH)?;
    let names = table
        .chunks_exact(NAME_WIDTH)
        .map(|field| utils::decode_text(utils::fixed_cstr(field), encoding))
        .collect();
    FieldNames::new(names).ok()
}
