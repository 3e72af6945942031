//! Visa Card Verification Value (CVV) calculation.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::crypto::visa_cvv::visa_cvv;
//!
//! let cvv = visa_cvv(
//!     "4433678298261175",
//!     "0916",
//!     "101",
//!     "4C37C8319D76ADAB58D9431543C2165B",
//! )
//! .unwrap();
//! assert_eq!(cvv, "478");
//! ```

use crate::crypto::decimalize::decimalize;
use crate::crypto::primitives::{des3_encrypt_ecb, des_encrypt_ecb, hex_decode, hex_encode, xor};
use crate::error::{HsmError, HsmResult};

/// Compute the 3-digit Visa CVV.
///
/// `pan` must be exactly 16 decimal digits, `expiration` is a 4-character
/// `YYMM`-like ASCII field, `service_code` is 3 ASCII digits, and `cvk` is
/// the 32-hex-character Card Verification Key (already stripped of any
/// leading scheme tag).
///
/// 1. `tsp = expiration || service_code || "000000000"` (16 hex chars).
/// 2. `block_a = DES(CVK[0:16]) encrypt of PAN` (PAN treated as a 16-hex-
///    digit block).
/// 3. `block1 = hex(block_a) XOR tsp`.
/// 4. `block2 = TripleDES(CVK) encrypt of block1`.
/// 5. Return `decimalize(hex(block2), 3)`.
///
/// # Errors
///
/// Returns [`HsmError::InvalidKeyLength`] if `cvk` is not 32 hex characters,
/// and [`HsmError::InvalidPanLength`] if `pan` is not 16 decimal digits.
pub fn visa_cvv(pan: &str, expiration: &str, service_code: &str, cvk: &str) -> HsmResult<String> {
    if cvk.len() != 32 {
        return Err(HsmError::InvalidKeyLength {
            expected: 32,
            actual: cvk.len(),
        });
    }
    if pan.len() != 16 || !pan.chars().all(|c| c.is_ascii_digit()) {
        return Err(HsmError::InvalidPanLength(pan.len()));
    }

    let cvk_bytes = hex_decode(cvk)?;
    let cvk16: [u8; 16] = cvk_bytes
        .clone()
        .try_into()
        .map_err(|_| HsmError::InvalidKeyLength {
            expected: 32,
            actual: cvk.len(),
        })?;
    let des_key: [u8; 8] = cvk_bytes[..8].try_into().expect("sliced to 8 bytes");

    let tsp = format!("{}{}{}", expiration, service_code, "000000000");

    let pan_bytes = hex_decode(pan)?;
    let pan_block: [u8; 8] = pan_bytes
        .try_into()
        .map_err(|_| HsmError::InvalidPanLength(pan.len()))?;

    let block_a = des_encrypt_ecb(&des_key, &pan_block)?;
    let tsp_bytes = hex_decode(&tsp)?;

    let block1 = xor(&block_a, &tsp_bytes)?;
    let block1_arr: [u8; 8] = block1.try_into().expect("xor preserves 8-byte length");

    let block2 = des3_encrypt_ecb(&cvk16, &block1_arr)?;

    Ok(decimalize(&hex_encode(&block2), 3))
}
