//! Wire framing: `[len: u16 big-endian][header: optional][command code: 2][body]`.
//!
//! Decoding validates the declared length and the optional header and hands
//! back the 2-byte command code plus the remaining body bytes, unsplit —
//! command-specific field splitting happens in [`crate::message::commands`].

use crate::error::{HsmError, HsmResult};
use crate::message::fields::FieldList;

/// Decode an incoming frame, returning the 2-byte command code and the
/// command body that follows it.
///
/// # Errors
///
/// Returns [`HsmError::LengthMismatch`] if the declared length does not
/// match the number of bytes following the length prefix, or
/// [`HsmError::InvalidHeader`] if a configured header does not match.
pub fn decode_frame<'a>(data: &'a [u8], header: Option<&[u8]>) -> HsmResult<(&'a str, &'a [u8])> {
    if data.len() < 2 {
        return Err(HsmError::LengthMismatch {
            expected: 0,
            actual: data.len().saturating_sub(2),
        });
    }
    let declared_len = u16::from_be_bytes([data[0], data[1]]) as usize;
    let rest = &data[2..];
    if declared_len != rest.len() {
        return Err(HsmError::LengthMismatch {
            expected: declared_len,
            actual: rest.len(),
        });
    }

    let after_header = if let Some(h) = header {
        if rest.len() < h.len() || &rest[..h.len()] != h {
            return Err(HsmError::InvalidHeader);
        }
        &rest[h.len()..]
    } else {
        rest
    };

    if after_header.len() < 2 {
        return Err(HsmError::MalformedHex(
            "frame body too short to contain a command code".to_string(),
        ));
    }
    let command_code = std::str::from_utf8(&after_header[..2])
        .map_err(|e| HsmError::MalformedHex(e.to_string()))?;
    let body = &after_header[2..];

    Ok((command_code, body))
}

/// Build an outgoing frame from response fields, prepending the optional
/// header and the 16-bit big-endian length of header plus body.
pub fn encode_frame(header: Option<&[u8]>, fields: &FieldList) -> Vec<u8> {
    let body = fields.to_bytes();
    let header_len = header.map_or(0, |h| h.len());
    let total_len = (header_len + body.len()) as u16;

    let mut out = Vec::with_capacity(2 + header_len + body.len());
    out.extend_from_slice(&total_len.to_be_bytes());
    if let Some(h) = header {
        out.extend_from_slice(h);
    }
    out.extend_from_slice(&body);
    out
}
