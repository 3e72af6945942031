//! Unwrapping of LMK-encrypted working keys.
//!
//! A wrapped key on the wire is a hex-ASCII encoded key body, optionally
//! preceded by a single ASCII scheme tag byte. The tag itself carries no
//! cryptographic meaning in this simulator (no key-block binding is
//! enforced) — it only determines the body length of a small number of
//! fields where an `U`-tagged key body is double-length. Modeled as an
//! explicit enum rather than sniffing the leading byte ad hoc wherever a
//! key field is read.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::crypto::key_wrap::{unwrap_key, SchemeTag};
//!
//! let tag = SchemeTag::from_leading_byte(b'U');
//! assert_eq!(tag, Some(SchemeTag::U));
//! ```

use crate::crypto::primitives::{des3_decrypt_ecb_blocks, hex_decode};
use crate::error::{HsmError, HsmResult};

/// The single-byte scheme tag that may precede a wrapped key's hex body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeTag {
    /// Double-length key, explicit tag, 32 hex characters follow.
    U,
    /// Tagged, body length matches the command's untagged schema length.
    T,
    /// Tagged, body length matches the command's untagged schema length.
    S,
}

impl SchemeTag {
    /// Recognize a scheme tag from a field's leading byte, if any.
    pub fn from_leading_byte(byte: u8) -> Option<SchemeTag> {
        match byte {
            b'U' => Some(SchemeTag::U),
            b'T' => Some(SchemeTag::T),
            b'S' => Some(SchemeTag::S),
            _ => None,
        }
    }
}

/// Strip a recognized leading scheme-tag byte, returning the remaining hex
/// body. A field with no recognized tag is returned unchanged.
pub fn strip_scheme_tag(field: &[u8]) -> &[u8] {
    match field.first() {
        Some(&b) if SchemeTag::from_leading_byte(b).is_some() => &field[1..],
        _ => field,
    }
}

/// Unwrap an LMK-encrypted key field into its raw 16-byte double-length
/// Triple-DES form.
///
/// 1. Strip a leading `U`/`T`/`S` scheme tag byte, if present.
/// 2. Hex-decode the remaining ASCII body.
/// 3. Triple-DES-ECB decrypt the result under `lmk`, block by block.
///
/// # Errors
///
/// Returns [`HsmError::MalformedHex`] if the body is not valid hex, or
/// [`HsmError::InvalidKeyLength`] if the decrypted key is not 16 bytes.
pub fn unwrap_key(lmk: &[u8; 16], wrapped: &[u8]) -> HsmResult<[u8; 16]> {
    let body = strip_scheme_tag(wrapped);
    let body_str =
        std::str::from_utf8(body).map_err(|e| HsmError::MalformedHex(e.to_string()))?;
    let encrypted = hex_decode(body_str)?;
    let raw = des3_decrypt_ecb_blocks(lmk, &encrypted)?;
    raw.try_into().map_err(|v: Vec<u8>| HsmError::InvalidKeyLength {
        expected: 16,
        actual: v.len(),
    })
}
