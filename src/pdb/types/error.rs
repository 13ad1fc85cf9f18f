//! Custom error types for the pdb-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// `TruncatedInput` and `MalformedHeader` raised while reading the header or
/// the record index abort the whole decode. Any error raised while decoding a
/// single record body is stored on that record's entry instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PdbError {
    /// A declared offset or length points past the end of the available bytes.
    #[error("Truncated input in {context}: need {needed} bytes, only {available} available")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// The header offsets are inconsistent, or a required appinfo table is missing.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// An enumerated subfield holds a value outside its known set.
    #[error("Unknown value {value} for {field}")]
    UnknownEnumValue { field: &'static str, value: u32 },

    /// A required NUL terminator was not found before the end of its region.
    #[error("Unterminated string in {context}")]
    UnterminatedString { context: &'static str },

    /// A bit-span request exceeds the buffer it reads from.
    #[error("Bit range {start}..{end} out of range for {available} bits")]
    OutOfRange {
        start: usize,
        end: usize,
        available: usize,
    },
}

/// A convenience `Result` type alias using the crate's `PdbError` type.
pub type Result<T> = std::result::Result<T, PdbError>;
