//! Memo Pad records (creator `memo`): one NUL-terminated text, trailing bytes ignored.

use super::{RecordContext, RecordFormat};
use crate::pdb::types::{error::Result, records::MemoRecord};
use crate::pdb::utils;

/// Zero-cost marker struct for Memo Pad records.
#[derive(Debug)]
pub struct Memo;

impl RecordFormat for Memo {
    const DEBUG_NAME: &'static str = "Memo";
    type Record = MemoRecord;

    fn decode(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<MemoRecord> {
        let mut reader = bytes;
        let text = utils::read_cstr(&mut reader, "memo text")?;
        Ok(MemoRecord {
            text: utils::decode_text(text, ctx.encoding),
        })
    }
}
