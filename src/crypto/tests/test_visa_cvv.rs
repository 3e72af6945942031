use crate::crypto::visa_cvv::visa_cvv;
use crate::error::HsmError;

#[test]
fn test_visa_cvv_known_vector() {
    let cvv = visa_cvv(
        "4433678298261175",
        "0916",
        "101",
        "4C37C8319D76ADAB58D9431543C2165B",
    )
    .unwrap();
    assert_eq!(cvv, "478");
}

#[test]
fn test_visa_cvv_bad_key_length() {
    let err = visa_cvv("4433678298261175", "0916", "101", "4C37C8").unwrap_err();
    assert!(matches!(err, HsmError::InvalidKeyLength { .. }));
}

#[test]
fn test_visa_cvv_bad_pan_length() {
    let err = visa_cvv(
        "443367829826",
        "0916",
        "101",
        "4C37C8319D76ADAB58D9431543C2165B",
    )
    .unwrap_err();
    assert!(matches!(err, HsmError::InvalidPanLength(_)));
}
