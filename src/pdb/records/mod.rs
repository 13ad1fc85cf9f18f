//! Creator-specific record body decoders.
//!
//! Each built-in PIM application gets a zero-sized marker type implementing
//! [`RecordFormat`]. [`decode`] picks the format from the database's
//! [`Creator`] and wraps the result in the matching [`Record`] variant;
//! unknown creators keep their bytes as [`Record::Unsupported`].

use encoding_rs::Encoding;
use log::trace;

use crate::pdb::types::{
    error::Result,
    models::{Creator, FieldNames},
    records::Record,
};
use crate::pdb::utils;

pub mod address;
pub mod datebook;
pub mod memo;
pub mod todo;

pub use address::Address;
pub use datebook::DateBook;
pub use memo::Memo;
pub use todo::ToDo;

/// Read-only state shared by every record of one database.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub encoding: &'static Encoding,
    /// Base address-book field names; the built-in defaults apply when `None`.
    pub labels: Option<&'a FieldNames>,
}

impl Default for RecordContext<'_> {
    fn default() -> Self {
        Self {
            encoding: utils::default_encoding(),
            labels: None,
        }
    }
}

/// A trait that defines how one application's record bodies are laid out.
pub trait RecordFormat {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// The structured value one record body decodes into.
    type Record;

    /// Decodes a single record body.
    fn decode(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<Self::Record>;
}

/// Decode one record body according to the database's creator.
pub fn decode(creator: Creator, bytes: &[u8], ctx: &RecordContext<'_>) -> Result<Record> {
    match creator {
        Creator::ToDo => decode_as::<ToDo>(bytes, ctx).map(Record::ToDo),
        Creator::Memo => decode_as::<Memo>(bytes, ctx).map(Record::Memo),
        Creator::Address => decode_as::<Address>(bytes, ctx).map(Record::Address),
        Creator::DateBook => decode_as::<DateBook>(bytes, ctx).map(Record::DateBook),
        Creator::Other(code) => {
            trace!("No decoder for creator {:?}, keeping {} raw bytes", code, bytes.len());
            Ok(Record::Unsupported(bytes.to_vec()))
        }
    }
}

fn decode_as<F: RecordFormat>(bytes: &[u8], ctx: &RecordContext<'_>) -> Result<F::Record> {
    trace!("Decoding {} record ({} bytes)", F::DEBUG_NAME, bytes.len());
    F::decode(bytes, ctx)
}
