//! Reversible mapping between raw bytes and printable text.
//!
//! Every byte is written as a fixed six-character unit `\u` followed by four
//! lowercase hex digits, so `[0x00, 0xff]` becomes `\u0000\u00ff`.

use crate::error::CodecError;

/// Marker that opens every encoded byte.
pub const BYTE_MARKER: &str = "\\u";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UNIT_LEN: usize = 6;
const PREVIEW_LEN: usize = 32;

/// Encode `bytes` as `\u%04x` units. The output is always `6 * bytes.len()` long.
pub fn bytes_to_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * UNIT_LEN);
    for &b in bytes {
        out.push_str(BYTE_MARKER);
        out.push_str("00");
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode text produced by [`bytes_to_text`].
///
/// The empty string decodes to no bytes; any other input must start with
/// [`BYTE_MARKER`].
pub fn text_to_bytes(text: &str) -> Result<Vec<u8>, CodecError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = text.strip_prefix(BYTE_MARKER) else {
        return Err(CodecError::InvalidFormat {
            text: preview(text),
        });
    };

    rest.split(BYTE_MARKER)
        .enumerate()
        .map(|(position, unit)| parse_unit(unit, position))
        .collect()
}

fn parse_unit(unit: &str, position: usize) -> Result<u8, CodecError> {
    let conversion = || CodecError::Conversion {
        unit: preview(unit),
        position,
    };
    if unit.len() != 4 || !unit.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(conversion());
    }
    let wide = u16::from_str_radix(unit, 16).map_err(|_| conversion())?;
    u8::try_from(wide).map_err(|_| conversion())
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
