//! Core data structures for Palm database components.
//!
//! This module defines the types shared across the decode pipeline:
//! - Header fields, database attributes and timestamps
//! - Categories, address-book labels and the resolved appinfo block
//! - Record index entries and the top-level [`Database`]

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use chrono::{DateTime, Utc};
use encoding_rs::Encoding;

use super::error::{PdbError, Result};
use super::records::Record;
use crate::pdb::bits;
use crate::pdb::utils;

/// Database attribute flags from header bytes 32–33.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DbAttributes {
    pub busy: bool,
    pub syncable: bool,
    pub protected: bool,
    pub reset: bool,
    pub rewritable: bool,
    pub archive: bool,
    pub dirty: bool,
    pub readonly: bool,
    pub resource: bool,
}

/// A point in time stored as seconds since the Unix epoch.
///
/// Palm stores seconds since 1904-01-01; the header decoder converts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn unix(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// A 16-bit packed date: 7 bits year offset from 1904, 4 bits month, 5 bits day.
///
/// No calendar validation is applied; month 0 or day 31 of February decode as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PackedDate {
    pub const YEAR_BASE: u16 = 1904;

    /// Decode the first two bytes of `bytes` as a packed date.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let year = bits::uint(bytes, 0, 7)? as u16 + Self::YEAR_BASE;
        let month = bits::uint(bytes, 7, 11)? as u8;
        let day = bits::uint(bytes, 11, 16)? as u8;
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for PackedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// The application that owns a database, taken from its creator code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Creator {
    ToDo,
    Memo,
    Address,
    DateBook,
    Other([u8; 4]),
}

impl Creator {
    pub fn from_code(code: [u8; 4]) -> Self {
        match &code {
            b"todo" => Self::ToDo,
            b"memo" => Self::Memo,
            b"addr" => Self::Address,
            b"date" => Self::DateBook,
            _ => Self::Other(code),
        }
    }

    pub fn code(&self) -> [u8; 4] {
        match self {
            Self::ToDo => *b"todo",
            Self::Memo => *b"memo",
            Self::Address => *b"addr",
            Self::DateBook => *b"date",
            Self::Other(code) => *code,
        }
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.code()))
    }
}

/// The fixed 80-byte database header plus the resolved section boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub attributes: DbAttributes,
    pub format_version: u16,
    pub created: Option<Timestamp>,
    pub modified: Option<Timestamp>,
    pub backed_up: Option<Timestamp>,
    pub modification_number: u32,
    /// 0 when the database has no appinfo block.
    pub appinfo_offset: u32,
    /// 0 when the database has no sortinfo block.
    pub sortinfo_offset: u32,
    pub type_code: [u8; 4],
    pub creator_code: [u8; 4],
    pub unique_id_seed: u32,
    pub record_count: u16,
    pub recordlist_offset: u16,
    /// Byte range of the appinfo block within the buffer.
    pub appinfo_range: Option<Range<usize>>,
    /// Byte range of the sortinfo block within the buffer.
    pub sortinfo_range: Option<Range<usize>>,
}

impl Header {
    pub const SIZE: usize = 80;

    pub fn creator(&self) -> Creator {
        Creator::from_code(self.creator_code)
    }
}

/// Category table from the appinfo block, keyed by slot position (0–15).
///
/// Slots with empty names are absent, and the remaining slots keep their
/// original positions because records refer to categories by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories(BTreeMap<u8, String>);

impl Categories {
    pub const SLOTS: usize = 16;
    pub const UNFILED: &'static str = "Unfiled";

    /// Build the table from per-slot names, synthesizing `{0: "Unfiled"}`
    /// when every slot is empty.
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = (u8, String)>,
    {
        let mut map: BTreeMap<u8, String> = slots
            .into_iter()
            .filter(|(_, name)| !name.is_empty())
            .collect();
        if map.is_empty() {
            map.insert(0, Self::UNFILED.to_string());
        }
        Self(map)
    }

    pub fn get(&self, slot: u8) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.0.iter().map(|(slot, name)| (*slot, name.as_str()))
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::from_slots(std::iter::empty())
    }
}

/// The 22 base field names of an address-book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames(Vec<String>);

impl FieldNames {
    pub const COUNT: usize = 22;

    /// Names used when neither the caller nor the file provides a label table.
    pub const DEFAULT: [&'static str; 22] = [
        "Last Name", "First Name", "Company", "Phone1", "Phone2", "Phone3",
        "Phone4", "Phone5", "Address", "City", "State", "Zip Code",
        "Country", "Title", "Custom1", "Custom2", "Custom3", "Custom4",
        "Note", "Phone6", "Phone7", "Phone8",
    ];

    /// Build a table from exactly 22 names.
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.len() != Self::COUNT {
            return Err(PdbError::MalformedHeader(format!(
                "address label table needs {} names, got {}",
                Self::COUNT,
                names.len()
            )));
        }
        Ok(Self(names))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// A copy of this table with the given `(index, name)` replacements applied.
    pub fn renamed<'n, I>(&self, renames: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'n str)>,
    {
        let mut names = self.0.clone();
        for (index, name) in renames {
            if let Some(slot) = names.get_mut(index) {
                *slot = name.to_string();
            }
        }
        Self(names)
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self(Self::DEFAULT.iter().map(|s| s.to_string()).collect())
    }
}

/// Decoded appinfo block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppInfo {
    pub categories: Categories,
    /// Address-book label table; only read for the `addr` creator.
    pub labels: Option<FieldNames>,
}

/// Per-record attribute byte from the record index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordAttributes {
    pub deleted: bool,
    pub dirty: bool,
    pub busy: bool,
    pub secret: bool,
    /// Category slot position (0–15).
    pub category: u8,
}

/// A raw record index entry, before the body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub offset: usize,
    pub length: usize,
    pub attributes: RecordAttributes,
}

impl IndexEntry {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// One record of the database: its location, attributes and decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub offset: usize,
    pub length: usize,
    pub attributes: RecordAttributes,
    /// Category name resolved through the category table.
    pub category: Option<String>,
    pub record: Result<Record>,
}

impl RecordEntry {
    pub fn is_ok(&self) -> bool {
        self.record.is_ok()
    }
}

/// A fully decoded Palm database.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub header: Header,
    pub app_info: AppInfo,
    /// Raw sortinfo block, uninterpreted.
    pub sort_info: Option<Vec<u8>>,
    pub records: Vec<RecordEntry>,
}

impl Database {
    pub fn creator(&self) -> Creator {
        self.header.creator()
    }

    pub fn categories(&self) -> &Categories {
        &self.app_info.categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordEntry> {
        self.records.iter()
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}): {} records, categories: [",
            self.header.name,
            self.creator(),
            String::from_utf8_lossy(&self.header.type_code),
            self.records.len()
        )?;
        for (i, (slot, name)) in self.categories().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", slot, name)?;
        }
        write!(f, "]")
    }
}

/// Settings for a decode pass.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Base address-book field names; overrides the file's label table.
    pub labels: Option<FieldNames>,
    /// Text encoding for all strings in the file.
    pub encoding: &'static Encoding,
}

impl DecodeOptions {
    pub fn with_labels(mut self, labels: FieldNames) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Select the text encoding by label; unknown labels keep the default.
    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = utils::parse_encoding(label);
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            labels: None,
            encoding: utils::default_encoding(),
        }
    }
}
