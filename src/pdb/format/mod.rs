//! File format parsing layer for Palm databases.
//!
//! # Module Organization
//!
//! - [`header`]: Decodes the fixed header and resolves section boundaries
//! - [`appinfo`]: Decodes categories and address-book labels
//! - [`index`]: Decodes the record index into offsets, lengths and attributes
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header (80 B)  │ ← header::parse()
//! ├─────────────────┤
//! │  Record Index   │ ← index::parse()
//! ├─────────────────┤
//! │  AppInfo        │ ← appinfo::parse()
//! ├─────────────────┤
//! │  SortInfo       │   (kept raw)
//! ├─────────────────┤
//! │  Record Bodies  │ ← records::decode()
//! └─────────────────┘
//! ```

pub mod appinfo;
pub mod header;
pub mod index;
