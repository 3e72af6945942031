//! ISO 9564 format 0 PIN block handling: decrypting the block received from
//! a terminal and recovering the clear PIN from it.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::pin::iso0::extract_pin;
//!
//! let pin = extract_pin("0412BCEEDCBA9876", "881123456789").unwrap();
//! assert_eq!(pin, "1234");
//! ```

use crate::crypto::primitives::{des3_decrypt_ecb, hex_decode, hex_encode, xor};
use crate::crypto::key_wrap::unwrap_key;
use crate::error::{HsmError, HsmResult};

/// Decrypt an ISO-0 PIN block under a wrapped Terminal PIN Key.
///
/// `encrypted_hex` is the 16-hex-character encrypted PIN block;
/// `wrapped_tpk` is the LMK-wrapped Terminal PIN Key. Returns the decrypted
/// PIN block as 16 hex characters.
pub fn decrypt_pin_block(lmk: &[u8; 16], encrypted_hex: &str, wrapped_tpk: &[u8]) -> HsmResult<String> {
    let tpk = unwrap_key(lmk, wrapped_tpk)?;
    let encrypted = hex_decode(encrypted_hex)?;
    let block: [u8; 8] = encrypted.try_into().map_err(|v: Vec<u8>| HsmError::MalformedHex(
        format!("PIN block must decode to 8 bytes, got {}", v.len()),
    ))?;
    let decrypted = des3_decrypt_ecb(&tpk, &block)?;
    Ok(hex_encode(&decrypted))
}

/// Recover the clear PIN from a decrypted ISO-0 PIN block and the account
/// number.
///
/// `pin_block_hex` is the 16-hex-character decrypted PIN block;
/// `account_number` is the 12-digit ASCII account number field (the 12
/// right-most PAN digits excluding the check digit).
///
/// # Errors
///
/// Returns [`HsmError::InvalidPinLength`] if the decoded length nibble is
/// outside `[4, 8]`, or [`HsmError::PinNonNumeric`] if the decoded PIN
/// contains a non-digit character.
pub fn extract_pin(pin_block_hex: &str, account_number: &str) -> HsmResult<String> {
    let raw_pb = hex_decode(pin_block_hex)?;
    let raw_acct = hex_decode(&format!("0000{}", account_number))?;
    let xored = xor(&raw_pb, &raw_acct)?;
    let xored_hex = hex_encode(&xored);

    let length = usize::from_str_radix(&xored_hex[0..2], 16)
        .map_err(|_| HsmError::MalformedHex(xored_hex.clone()))?;

    if !(4..=8).contains(&length) {
        return Err(HsmError::InvalidPinLength(length));
    }

    let pin = &xored_hex[2..2 + length];
    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(HsmError::PinNonNumeric);
    }

    Ok(pin.to_string())
}
