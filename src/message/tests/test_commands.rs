use crate::message::commands::*;

#[test]
fn test_parse_dc_fields() {
    let data = b"UDEADBEEFDEADBEEFDEADBEEFDEADBEEF1234567890ABCDEF1234567890ABCDEF2B687AEFC34B1A890100112345678918723";
    match parse_body("DC", data) {
        Request::Dc(dc) => {
            assert_eq!(dc.tpk, "UDEADBEEFDEADBEEFDEADBEEFDEADBEEF");
            assert_eq!(dc.pvk_pair, "1234567890ABCDEF1234567890ABCDEF");
            assert_eq!(dc.pin_block, "2B687AEFC34B1A89");
            assert_eq!(dc.pin_block_format_code, "01");
            assert_eq!(dc.account_number, "001123456789");
            assert_eq!(dc.pvki, "1");
            assert_eq!(dc.pvv, "8723");
        }
        other => panic!("expected DC request, got {:?}", other),
    }
}

#[test]
fn test_parse_unknown_command() {
    match parse_body("ZZ", b"") {
        Request::Unknown(code) => assert_eq!(code, "ZZ"),
        other => panic!("expected Unknown request, got {:?}", other),
    }
}

#[test]
fn test_parse_nc_has_no_body() {
    matches!(parse_body("NC", b""), Request::Nc);
}

#[test]
fn test_parse_ca_fields_from_translation_scenario() {
    let data = b"UED4A35D52C9063A1ED4A35D52C9063A1UD39D39EB7C932CF367C97C5B10B2C195127DF366B86AE2D9A70101552000000012";
    match parse_body("CA", data) {
        Request::Ca(ca) => {
            assert_eq!(ca.tpk, "UED4A35D52C9063A1ED4A35D52C9063A1");
            assert_eq!(ca.destination_key, "UD39D39EB7C932CF367C97C5B10B2C195");
            assert_eq!(ca.maximum_pin_length, "12");
            assert_eq!(ca.source_pin_block, "7DF366B86AE2D9A7");
            assert_eq!(ca.source_pin_block_format, "01");
            assert_eq!(ca.destination_pin_block_format, "01");
            assert_eq!(ca.account_number, "552000000012");
        }
        other => panic!("expected CA request, got {:?}", other),
    }
}

#[test]
fn test_parse_cy_fields() {
    let data = b"4C37C8319D76ADAB58D9431543C2165B478" // CVK(32) + CVV(3)
        .iter()
        .chain(b"4433678298261175;0916101")
        .copied()
        .collect::<Vec<u8>>();
    match parse_body("CY", &data) {
        Request::Cy(cy) => {
            assert_eq!(cy.cvk, "4C37C8319D76ADAB58D9431543C2165B");
            assert_eq!(cy.cvv, "478");
            assert_eq!(cy.primary_account_number, "4433678298261175");
            assert_eq!(cy.expiration_date, "0916");
            assert_eq!(cy.service_code, "101");
        }
        other => panic!("expected CY request, got {:?}", other),
    }
}
