//! Block-level DES/Triple-DES primitives, hex conversions, and byte XOR.
//!
//! Every cipher primitive here operates on a single 8-byte block with no
//! padding; callers that need to process longer data (key bodies, PIN
//! blocks) do so by chaining independent ECB blocks themselves. Triple-DES
//! throughout this crate means two-key (16-byte) Triple-DES EDE, matching
//! the double-length keys an LMK wraps.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::crypto::primitives::{des3_encrypt_ecb, des3_decrypt_ecb};
//!
//! let key = [0u8; 16];
//! let block = [0u8; 8];
//! let encrypted = des3_encrypt_ecb(&key, &block).unwrap();
//! let decrypted = des3_decrypt_ecb(&key, &encrypted).unwrap();
//! assert_eq!(decrypted, block);
//! ```

use crate::error::{HsmError, HsmResult};
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::{Des, TdesEde2};

/// Encrypt a single 8-byte block under a single-length (8-byte) DES key.
///
/// # Errors
///
/// Returns [`HsmError::Cipher`] if `key` is not a valid DES key (it always
/// is, for an 8-byte slice, but key construction is fallible by signature).
pub fn des_encrypt_ecb(key: &[u8; 8], block: &[u8; 8]) -> HsmResult<[u8; 8]> {
    let cipher =
        Des::new_from_slice(key).map_err(|e| HsmError::Cipher(e.to_string()))?;
    let mut buf = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut buf);
    Ok(buf.into())
}

/// Encrypt a single 8-byte block under a double-length (16-byte) Triple-DES
/// EDE key.
pub fn des3_encrypt_ecb(key: &[u8; 16], block: &[u8; 8]) -> HsmResult<[u8; 8]> {
    let cipher =
        TdesEde2::new_from_slice(key).map_err(|e| HsmError::Cipher(e.to_string()))?;
    let mut buf = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut buf);
    Ok(buf.into())
}

/// Decrypt a single 8-byte block under a double-length (16-byte) Triple-DES
/// EDE key.
pub fn des3_decrypt_ecb(key: &[u8; 16], block: &[u8; 8]) -> HsmResult<[u8; 8]> {
    let cipher =
        TdesEde2::new_from_slice(key).map_err(|e| HsmError::Cipher(e.to_string()))?;
    let mut buf = GenericArray::clone_from_slice(block);
    cipher.decrypt_block(&mut buf);
    Ok(buf.into())
}

/// Decode an upper-case ASCII hex string into raw bytes.
///
/// # Errors
///
/// Returns [`HsmError::MalformedHex`] if `s` has odd length or contains
/// characters outside `[0-9A-Fa-f]`.
pub fn hex_decode(s: &str) -> HsmResult<Vec<u8>> {
    hex::decode(s).map_err(|e| HsmError::MalformedHex(e.to_string()))
}

/// Encode raw bytes as an upper-case ASCII hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Bitwise XOR of two equal-length byte buffers.
///
/// # Errors
///
/// Returns [`HsmError::LengthMismatchXor`] if `a` and `b` differ in length.
pub fn xor(a: &[u8], b: &[u8]) -> HsmResult<Vec<u8>> {
    if a.len() != b.len() {
        return Err(HsmError::LengthMismatchXor);
    }
    Ok(a.iter().zip(b.iter()).map(|(&x, &y)| x ^ y).collect())
}

/// Triple-DES-ECB process raw bytes as a sequence of independent 8-byte
/// blocks, encrypting each under `key`. `data.len()` must be a multiple of 8.
pub fn des3_encrypt_ecb_blocks(key: &[u8; 16], data: &[u8]) -> HsmResult<Vec<u8>> {
    if data.len() % 8 != 0 {
        return Err(HsmError::Cipher(format!(
            "data length {} is not a multiple of the 8-byte block size",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(8) {
        let block: [u8; 8] = chunk.try_into().expect("chunk is exactly 8 bytes");
        out.extend_from_slice(&des3_encrypt_ecb(key, &block)?);
    }
    Ok(out)
}

/// Triple-DES-ECB process raw bytes as a sequence of independent 8-byte
/// blocks, decrypting each under `key`. `data.len()` must be a multiple of 8.
pub fn des3_decrypt_ecb_blocks(key: &[u8; 16], data: &[u8]) -> HsmResult<Vec<u8>> {
    if data.len() % 8 != 0 {
        return Err(HsmError::Cipher(format!(
            "data length {} is not a multiple of the 8-byte block size",
            data.len()
        )));
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(8) {
        let block: [u8; 8] = chunk.try_into().expect("chunk is exactly 8 bytes");
        out.extend_from_slice(&des3_decrypt_ecb(key, &block)?);
    }
    Ok(out)
}
