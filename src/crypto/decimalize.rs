//! Decimalization: the shared PVV/CVV digit-selection algorithm.
//!
//! This is the same two-pass scan used by both Visa PVV and Visa CVV to
//! turn a hex-ASCII ciphertext into a fixed number of decimal digits.
//!
//! # Example
//!
//! ```
//! use thales_hsm_sim::crypto::decimalize::decimalize;
//!
//! assert_eq!(decimalize("59EF34AD722C0556F7F6FBD4A76D38E6", 4), "5934");
//! ```

/// Extract `length` decimal digits from a hex-ASCII string.
///
/// First scan, left to right: collect characters whose value is a decimal
/// digit `0`-`9`, in order, until `length` digits are collected. If the
/// first scan does not yield enough digits, a second left-to-right scan
/// collects the remaining hex digits `A`-`F`, converting each to a decimal
/// digit by subtracting 10.
///
/// Panics only if `hex` does not contain at least `length` hex characters
/// in total, which cannot happen for the fixed-width ciphertexts this
/// crate's PVV/CVV callers pass in.
pub fn decimalize(hex: &str, length: usize) -> String {
    let mut digits = String::with_capacity(length);

    for c in hex.chars() {
        if digits.len() >= length {
            break;
        }
        if c.is_ascii_digit() {
            digits.push(c);
        }
    }

    if digits.len() < length {
        for c in hex.chars() {
            if digits.len() >= length {
                break;
            }
            if let Some(v) = c.to_digit(16) {
                if v >= 10 {
                    digits.push_str(&(v - 10).to_string());
                }
            }
        }
    }

    digits
}
