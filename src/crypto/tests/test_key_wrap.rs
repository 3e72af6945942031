use crate::crypto::key_wrap::*;
use crate::crypto::primitives::{des3_encrypt_ecb_blocks, hex_encode};
use crate::error::HsmError;

const DEFAULT_LMK: [u8; 16] = [
    0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF,
];

#[test]
fn test_scheme_tag_recognition() {
    assert_eq!(SchemeTag::from_leading_byte(b'U'), Some(SchemeTag::U));
    assert_eq!(SchemeTag::from_leading_byte(b'T'), Some(SchemeTag::T));
    assert_eq!(SchemeTag::from_leading_byte(b'S'), Some(SchemeTag::S));
    assert_eq!(SchemeTag::from_leading_byte(b'X'), None);
}

#[test]
fn test_strip_scheme_tag() {
    assert_eq!(strip_scheme_tag(b"UABCD"), b"ABCD");
    assert_eq!(strip_scheme_tag(b"ABCD"), b"ABCD");
}

#[test]
fn test_unwrap_key_default_lmk_round_trip() {
    let plaintext_key = [0x42u8; 16];
    let encrypted = des3_encrypt_ecb_blocks(&DEFAULT_LMK, &plaintext_key).unwrap();
    let wrapped = format!("U{}", hex_encode(&encrypted));

    let unwrapped = unwrap_key(&DEFAULT_LMK, wrapped.as_bytes()).unwrap();
    assert_eq!(unwrapped, plaintext_key);
}

#[test]
fn test_unwrap_key_untagged() {
    let plaintext_key = [0x99u8; 16];
    let encrypted = des3_encrypt_ecb_blocks(&DEFAULT_LMK, &plaintext_key).unwrap();
    let wrapped = hex_encode(&encrypted);

    let unwrapped = unwrap_key(&DEFAULT_LMK, wrapped.as_bytes()).unwrap();
    assert_eq!(unwrapped, plaintext_key);
}

#[test]
fn test_unwrap_key_malformed_hex() {
    let err = unwrap_key(&DEFAULT_LMK, b"UZZZZ").unwrap_err();
    assert!(matches!(err, HsmError::MalformedHex(_)));
}
