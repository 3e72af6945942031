//! Process-wide configuration shared, read-only, across every connection.

use crate::crypto::primitives::hex_decode;
use crate::error::{HsmError, HsmResult};

/// The default LMK used when none is configured, matching the firmware
/// default this simulator imitates.
pub const DEFAULT_LMK_HEX: &str = "deadbeefdeadbeefdeadbeefdeadbeef";

/// Firmware version string reported by the `NC` diagnostics command.
pub const FIRMWARE_VERSION: &str = "0007-E000";

/// Immutable, shareable context threaded through every command handler:
/// the Local Master Key and the wire header, if one is configured.
///
/// Constructed once at startup; never mutated afterwards, so it is safe to
/// share across connection threads without synchronization.
#[derive(Debug, Clone)]
pub struct Context {
    lmk: [u8; 16],
    header: Option<Vec<u8>>,
}

impl Context {
    /// Build a context from a hex-encoded LMK and an optional header.
    ///
    /// # Errors
    ///
    /// Returns [`HsmError::InvalidKeyLength`] if `lmk_hex` does not decode
    /// to exactly 16 bytes. This is treated as fatal at startup by callers.
    pub fn new(lmk_hex: &str, header: Option<Vec<u8>>) -> HsmResult<Self> {
        let lmk_bytes = hex_decode(lmk_hex)?;
        let lmk: [u8; 16] =
            lmk_bytes
                .clone()
                .try_into()
                .map_err(|_| HsmError::InvalidKeyLength {
                    expected: 16,
                    actual: lmk_bytes.len(),
                })?;
        Ok(Context { lmk, header })
    }

    pub fn lmk(&self) -> &[u8; 16] {
        &self.lmk
    }

    pub fn header(&self) -> Option<&[u8]> {
        self.header.as_deref()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(DEFAULT_LMK_HEX, None).expect("default LMK is always valid")
    }
}
