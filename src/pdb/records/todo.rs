//! To Do list records (creator `todo`).
//!
//! ```text
//! [0..2] due date, packed; 0xFF in byte 0 means no due date
//! [2]    bit 0: done, bits 5..8: priority
//! [3..]  description\0 note\0
//! ```

use super::{RecordContext, RecordFormat};
use crate::pdb::bits::BitReader;
use crate::pdb::types::{error::Result, models::PackedDate, records::ToDoRecord};
use crate::pdb::utils;

const NO_DATE: u8 = 0xFF;

/// Zero-cost marker struct for To Do records.
#[derive(Debug)]
pub struct ToDo;

impl RecordFormat for ToDo {
    const DEBUG_NAME: &'static str = "ToDo";
    type Record = ToDoRecord;

    fn decode(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<ToDoRecord> {
        let fixed = utils::take(bytes, 0, 3, "todo record")?;
        let reader = BitReader::new(fixed);

        let due = if reader.u8_at(0)? == NO_DATE {
            None
        } else {
            Some(PackedDate::decode(fixed)?)
        };
        let done = reader.bit(16)?;
        let priority = reader.uint(21, 24)? as u8;

        let mut text = &bytes[3..];
        let description = utils::read_cstr(&mut text, "todo description")?;
        let note = utils::read_cstr(&mut text, "todo note")?;

        Ok(ToDoRecord {
            due,
            done,
            priority,
            description: utils::decode_text(description, ctx.encoding),
            note: utils::decode_text(note, ctx.encoding),
        })
    }
}
