//! # pdb-reader
//!
//! A reader for Palm OS database files (`.pdb`).
//! Decodes the header, category table and record index of any database,
//! and the record bodies of the built-in To Do, Memo Pad, Address Book and
//! Date Book applications.
pub mod pdb;

// Re-export the main types for convenience
pub use pdb::{
    decode, decode_with_options, parse_app_info, parse_header, parse_header_with,
    parse_records,
    records::{RecordContext, RecordFormat},
    AppInfo, Categories, Creator, Database, DecodeOptions, FieldNames, Header, PackedDate,
    PdbError, Record, RecordEntry, Result,
};
