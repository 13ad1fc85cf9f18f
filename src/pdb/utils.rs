//! Low-level byte and text helpers shared by the header and record decoders.

use encoding_rs::{Encoding, WINDOWS_1252};
use log::warn;

use crate::pdb::types::error::{PdbError, Result};

/// Text encoding used when the caller does not choose one.
///
/// Palm OS stores text in its Latin code page, which matches Windows-1252.
pub fn default_encoding() -> &'static Encoding {
    WINDOWS_1252
}

/// Resolve an encoding label such as `"shift_jis"` or `"windows-1252"`.
///
/// Unknown labels fall back to [`default_encoding`].
pub fn parse_encoding(label: &str) -> &'static Encoding {
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => encoding,
        None => {
            let fallback = default_encoding();
            warn!("Unknown text encoding '{}', falling back to {}", label, fallback.name());
            fallback
        }
    }
}

/// Borrow `len` bytes at `offset`, or fail with `TruncatedInput`.
pub fn take<'a>(
    buffer: &'a [u8],
    offset: usize,
    len: usize,
    context: &'static str,
) -> Result<&'a [u8]> {
    let end = offset.saturating_add(len);
    buffer.get(offset..end).ok_or(PdbError::TruncatedInput {
        context,
        needed: end,
        available: buffer.len(),
    })
}

/// Contents of a fixed-size field up to its first NUL, or the whole field
/// when no terminator is present.
pub fn fixed_cstr(field: &[u8]) -> &[u8] {
    match field.iter().position(|&b| b == 0) {
        Some(end) => &field[..end],
        None => field,
    }
}

/// Read one NUL-terminated string and advance `reader` past its terminator.
pub fn read_cstr<'a>(reader: &mut &'a [u8], context: &'static str) -> Result<&'a [u8]> {
    let end = reader
        .iter()
        .position(|&b| b == 0)
        .ok_or(PdbError::UnterminatedString { context })?;
    let text = &reader[..end];
    *reader = &reader[end + 1..];
    Ok(text)
}

/// Decode raw text bytes with the database's encoding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}
