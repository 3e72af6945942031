use crate::crypto::decimalize::decimalize;

#[test]
fn test_decimalize_all_decimal_digits() {
    assert_eq!(decimalize("59EF34AD722C0556F7F6FBD4A76D38E6", 4), "5934");
}

#[test]
fn test_decimalize_needs_second_pass() {
    assert_eq!(decimalize("EEFADCFFFBD7ADECAB9FBB", 4), "7944");
}

#[test]
fn test_decimalize_length_4() {
    assert_eq!(decimalize("EFADCFFFBDADECABFBB", 4), "4503");
}

#[test]
fn test_decimalize_length_3() {
    assert_eq!(decimalize("EFADCFFFBDADECABFBB", 3), "450");
}

#[test]
fn test_decimalize_returns_exact_length() {
    for l in 1..=6 {
        let hex = "0123456789ABCDEF0123456789ABCDEF";
        assert_eq!(decimalize(hex, l).len(), l);
    }
}
