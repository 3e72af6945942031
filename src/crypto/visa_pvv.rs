//! Visa PIN Verification Value (PVV) calculation.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::crypto::visa_pvv::visa_pvv;
//!
//! let pvk = [0u8; 16];
//! let pvv = visa_pvv("881123456789", "1", "1234", &pvk).unwrap();
//! assert_eq!(pvv.len(), 4);
//! ```

use crate::crypto::decimalize::decimalize;
use crate::crypto::primitives::{des3_encrypt_ecb, hex_encode};
use crate::error::{HsmError, HsmResult};

/// Compute the 4-digit Visa PVV.
///
/// Builds the Transformation Security Parameter (TSP) from the rightmost 11
/// digits of `account_number` (itself already the 12 right-most PAN digits
/// excluding the check digit, per the ISO-0 account field), the single
/// `pvki` digit, and the first 4 digits of the clear PIN — 16 decimal
/// digits in total. The TSP, packed as 8 bytes, is Triple-DES-ECB
/// encrypted under `pvk` and decimalized to 4 digits.
///
/// # Errors
///
/// Returns [`HsmError::InvalidAccountNumberLength`] if `account_number` is
/// not 12 digits. Returns [`HsmError::MalformedHex`] if the assembled TSP is
/// not a valid 16-digit hex string (it always is for well-formed numeric
/// inputs, since every accepted character is `0`-`9`).
pub fn visa_pvv(
    account_number: &str,
    pvki: &str,
    pin_first4: &str,
    pvk: &[u8; 16],
) -> HsmResult<String> {
    if account_number.len() != 12 {
        return Err(HsmError::InvalidAccountNumberLength(account_number.len()));
    }
    let tsp = format!("{}{}{}", &account_number[..11], pvki, pin_first4);

    let block_bytes = crate::crypto::primitives::hex_decode(&tsp)?;
    let block: [u8; 8] = block_bytes
        .try_into()
        .map_err(|_| HsmError::MalformedHex(format!("TSP is not 16 hex characters: {}", tsp)))?;

    let encrypted = des3_encrypt_ecb(pvk, &block)?;
    Ok(decimalize(&hex_encode(&encrypted), 4))
}
