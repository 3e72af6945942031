//! Error taxonomy for the HSM command-processing core.
//!
//! Every failure the core can produce is one of the variants below. Framing
//! failures (`LengthMismatch`, `InvalidHeader`) are reported to the session
//! driver and cause the offending frame to be dropped. Validation failures
//! inside command handlers (e.g. `PinNonNumeric`) are caught by the
//! dispatcher and turned into an Error Code `"01"` response rather than
//! propagated. See the dispatcher module for which variants are recoverable.

use thiserror::Error;

/// Errors produced while decoding, validating, or cryptographically
/// processing an HSM command.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HsmError {
    /// The declared frame length did not match the number of bytes received.
    #[error("Expected message of length {expected} but actual received message length is {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The configured wire header did not match the header bytes on the frame.
    #[error("Invalid header")]
    InvalidHeader,

    /// A hex-ASCII field had odd length or contained non-hex characters.
    #[error("Malformed hex string: {0}")]
    MalformedHex(String),

    /// A wrapped or unwrapped key did not have the expected byte length.
    #[error("Incorrect key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The decoded PIN length nibble was outside the valid `[4, 8]` range.
    #[error("Incorrect PIN length: {0}")]
    InvalidPinLength(usize),

    /// The decoded PIN contained a non-digit character.
    #[error("PIN contains non-numeric characters")]
    PinNonNumeric,

    /// A PIN block format other than ISO-0 (`"01"`) was requested.
    #[error("Unsupported PIN block format: {0}")]
    UnsupportedFormat(String),

    /// CA's source and destination PIN block formats differed.
    #[error("Cannot translate PIN block from format {source} to format {destination}")]
    UnsupportedTranslation { source: String, destination: String },

    /// The decoded Primary Account Number was not 16 decimal digits.
    #[error("Incorrect PAN length: expected 16, got {0}")]
    InvalidPanLength(usize),

    /// The Account Number field supplied to the PVV calculation was not 12
    /// decimal digits.
    #[error("Incorrect account number length: expected 12, got {0}")]
    InvalidAccountNumberLength(usize),

    /// Two byte buffers that were required to be of equal length were not.
    #[error("Arrays must be of the same length")]
    LengthMismatchXor,

    /// Lower-level cipher construction failed (e.g. bad key length supplied
    /// directly to a primitive rather than through a length-checked caller).
    #[error("Cipher error: {0}")]
    Cipher(String),
}

pub type HsmResult<T> = Result<T, HsmError>;
