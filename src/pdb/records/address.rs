//! Address Book records (creator `addr`).
//!
//! ```text
//! [0..4] phone label nibbles: bits 8..12 display phone (0-4),
//!        bits 12..32 renames for Phone5..Phone1 (0-7 into PHONE_LABELS)
//! [4..8] field presence bitmap, field k present when bit 31-k is set
//! [8]    reserved
//! [9..]  one NUL-terminated value per present field, in field order
//! ```

use log::trace;

use super::{RecordContext, RecordFormat};
use crate::pdb::bits::BitReader;
use crate::pdb::types::{
    error::{PdbError, Result},
    models::FieldNames,
    records::{AddressFields, AddressRecord},
};
use crate::pdb::utils;

/// Names that the five renameable phone fields can take.
pub const PHONE_LABELS: [&str; 8] = [
    "Work", "Home", "Fax", "Other", "E-mail", "Main", "Pager", "Mobile",
];

/// Logical index of Phone1; Phone1..Phone5 are fields 3..=7.
const FIRST_PHONE: usize = 3;
const PHONE_COUNT: usize = 5;

/// Zero-cost marker struct for Address Book records.
#[derive(Debug)]
pub struct Address;

impl RecordFormat for Address {
    const DEBUG_NAME: &'static str = "Address";
    type Record = AddressRecord;

    fn decode(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<AddressRecord> {
        let fixed = utils::take(bytes, 0, 9, "address record")?;
        let reader = BitReader::new(fixed);

        // Phone labels: the last nibble renames Phone1, the third Phone5.
        let display_phone = reader.uint(8, 12)? as usize;
        let mut renames = Vec::with_capacity(PHONE_COUNT);
        for phone in 0..PHONE_COUNT {
            let end = 32 - phone * 4;
            let code = reader.uint(end - 4, end)? as usize;
            let label = PHONE_LABELS.get(code).ok_or(PdbError::UnknownEnumValue {
                field: "address phone label",
                value: code as u32,
            })?;
            renames.push((FIRST_PHONE + phone, *label));
        }

        let default_names;
        let base = match ctx.labels {
            Some(labels) => labels,
            None => {
                default_names = FieldNames::default();
                &default_names
            }
        };
        let names = base.renamed(renames);

        let present = reader.sub(4, 4)?;
        let mut values = &bytes[9..];
        let mut fields = AddressFields::default();
        for field in 0..FieldNames::COUNT {
            if !present.bit(31 - field)? {
                continue;
            }
            let value = utils::read_cstr(&mut values, "address field")?;
            let name = names.get(field).unwrap_or_default().to_string();
            trace!("Address field {} ({}): {} bytes", field, name, value.len());
            fields.insert(name, utils::decode_text(value, ctx.encoding));
        }

        // Selectors past Phone5 name no phone, so there is no default field.
        let display_name = if display_phone < PHONE_COUNT {
            names.get(FIRST_PHONE + display_phone).unwrap_or_default()
        } else {
            trace!("Address display phone {} is out of range", display_phone);
            ""
        };
        let default_field = if fields.contains(display_name) {
            display_name.to_string()
        } else {
            String::new()
        };

        Ok(AddressRecord {
            fields,
            default_field,
        })
    }
}
