//! Command dispatcher: routes a parsed [`Request`] to its handler and
//! builds the response field list.
//!
//! Every handler is a pure function of its request fields and the shared
//! [`Context`] — no I/O, no suspension. Validation failures inside `DC`
//! and `CY` are caught here and turned into an Error Code `"01"` response;
//! only `CA`'s translation errors propagate to the caller, which is
//! expected to drop the frame (see spec's Failure Semantics).

use crate::context::{Context, FIRMWARE_VERSION};
use crate::crypto::key_wrap::{strip_scheme_tag, unwrap_key};
use crate::crypto::primitives::{des3_encrypt_ecb, hex_decode, hex_encode};
use crate::crypto::visa_cvv::visa_cvv;
use crate::crypto::visa_pvv::visa_pvv;
use crate::error::{HsmError, HsmResult};
use crate::message::commands::{CaRequest, CyRequest, DcRequest, Request};
use crate::message::fields::FieldList;
use crate::pin::iso0::{decrypt_pin_block, extract_pin};

/// Dispatch a parsed request to its handler and build the response fields.
///
/// # Errors
///
/// Only `CA` can return an error here (an unsupported or mismatched PIN
/// block format); every other command always produces a response, using
/// Error Code `"01"` for recoverable validation failures.
pub fn dispatch(ctx: &Context, request: Request) -> HsmResult<FieldList> {
    match request {
        Request::Nc => Ok(handle_diagnostics(ctx)),
        Request::Dc(req) => Ok(handle_verify_pin(ctx, &req)),
        Request::Ca(req) => handle_translate_pinblock(ctx, &req),
        Request::Cy(req) => Ok(handle_verify_cvv(&req)),
        Request::Unknown(code) => {
            log::debug!("unrecognized command code {:?}, responding ZZ", code);
            Ok(handle_unknown())
        }
    }
}

/// `NC` -> `ND`: report the LMK check value and firmware version.
fn handle_diagnostics(ctx: &Context) -> FieldList {
    let mut fields = FieldList::new();
    fields.push("Response Code", b"ND".to_vec());
    fields.push("Error Code", b"00".to_vec());

    let encrypted = des3_encrypt_ecb(ctx.lmk(), &[0u8; 8]).expect("LMK is always 16 bytes");
    fields.push("LMK Check Value", hex_encode(&encrypted).into_bytes());
    fields.push("Firmware Version", FIRMWARE_VERSION.as_bytes().to_vec());
    fields
}

/// `DC` -> `DD`: decrypt the PIN block, recover the clear PIN, recompute
/// the PVV and compare it to the one the request carried.
fn handle_verify_pin(ctx: &Context, req: &DcRequest) -> FieldList {
    let mut fields = FieldList::new();
    fields.push("Response Code", b"DD".to_vec());

    let outcome: HsmResult<bool> = (|| {
        let decrypted = decrypt_pin_block(ctx.lmk(), &req.pin_block, req.tpk.as_bytes())?;
        let pin = extract_pin(&decrypted, &req.account_number)?;
        let pvk = unwrap_key(ctx.lmk(), req.pvk_pair.as_bytes())?;
        let pvv = visa_pvv(&req.account_number, &req.pvki, &pin[..4], &pvk)?;
        Ok(pvv == req.pvv)
    })();

    match outcome {
        Ok(true) => fields.push("Error Code", b"00".to_vec()),
        Ok(false) => {
            log::debug!("PVV mismatch for account {}", req.account_number);
            fields.push("Error Code", b"01".to_vec());
        }
        Err(e) => {
            log::debug!("DC validation failed: {e}");
            fields.push("Error Code", b"01".to_vec());
        }
    }
    fields
}

/// `CA` -> `CB`: translate a PIN block from the Terminal PIN Key to a
/// destination key, same PIN block format on both sides.
fn handle_translate_pinblock(ctx: &Context, req: &CaRequest) -> HsmResult<FieldList> {
    if req.source_pin_block_format != req.destination_pin_block_format {
        return Err(HsmError::UnsupportedTranslation {
            source: req.source_pin_block_format.clone(),
            destination: req.destination_pin_block_format.clone(),
        });
    }
    if req.source_pin_block_format != "01" {
        return Err(HsmError::UnsupportedFormat(req.source_pin_block_format.clone()));
    }

    let decrypted_hex = decrypt_pin_block(ctx.lmk(), &req.source_pin_block, req.tpk.as_bytes())?;
    let pin_length = &decrypted_hex[0..2];

    let destination_key_body = strip_scheme_tag(req.destination_key.as_bytes());
    let destination_key_hex = std::str::from_utf8(destination_key_body)
        .map_err(|e| HsmError::MalformedHex(e.to_string()))?;
    let destination_key_bytes = hex_decode(destination_key_hex)?;
    let destination_key: [u8; 16] =
        destination_key_bytes
            .clone()
            .try_into()
            .map_err(|_| HsmError::InvalidKeyLength {
                expected: 16,
                actual: destination_key_bytes.len(),
            })?;

    let decrypted_bytes = hex_decode(&decrypted_hex)?;
    let decrypted_block: [u8; 8] =
        decrypted_bytes
            .clone()
            .try_into()
            .map_err(|_| HsmError::MalformedHex(decrypted_hex.clone()))?;

    let translated = des3_encrypt_ecb(&destination_key, &decrypted_block)?;

    let mut fields = FieldList::new();
    fields.push("Response Code", b"CB".to_vec());
    fields.push("Error Code", b"00".to_vec());
    fields.push("PIN Length", pin_length.as_bytes().to_vec());
    fields.push("Destination PIN Block", hex_encode(&translated).into_bytes());
    fields.push(
        "Destination PIN Block format",
        req.destination_pin_block_format.clone().into_bytes(),
    );
    Ok(fields)
}

/// `CY` -> `CZ`: recompute the Visa CVV and compare it to the request's.
fn handle_verify_cvv(req: &CyRequest) -> FieldList {
    let mut fields = FieldList::new();
    fields.push("Response Code", b"CZ".to_vec());

    let cvk_body = strip_scheme_tag(req.cvk.as_bytes());
    let cvk_hex = String::from_utf8_lossy(cvk_body);
    let outcome = visa_cvv(
        &req.primary_account_number,
        &req.expiration_date,
        &req.service_code,
        &cvk_hex,
    );

    match outcome {
        Ok(cvv) if cvv == req.cvv => fields.push("Error Code", b"00".to_vec()),
        Ok(cvv) => {
            log::debug!("CVV mismatch: {cvv} != {}", req.cvv);
            fields.push("Error Code", b"01".to_vec());
        }
        Err(e) => {
            log::debug!("CY validation failed: {e}");
            fields.push("Error Code", b"01".to_vec());
        }
    }
    fields
}

fn handle_unknown() -> FieldList {
    let mut fields = FieldList::new();
    fields.push("Response Code", b"ZZ".to_vec());
    fields.push("Error Code", b"00".to_vec());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_yields_zz() {
        let ctx = Context::default();
        let fields = dispatch(&ctx, Request::Unknown("XX".to_string())).unwrap();
        assert_eq!(fields.to_bytes(), b"ZZ00".to_vec());
    }

    #[test]
    fn test_diagnostics_reports_firmware_and_kcv() {
        let ctx = Context::default();
        let fields = dispatch(&ctx, Request::Nc).unwrap();
        assert_eq!(fields.get("Response Code"), Some(b"ND".as_slice()));
        assert_eq!(fields.get("Error Code"), Some(b"00".as_slice()));
        assert_eq!(fields.get("LMK Check Value").unwrap().len(), 16);
        assert_eq!(
            fields.get("Firmware Version"),
            Some(FIRMWARE_VERSION.as_bytes())
        );
    }

    #[test]
    fn test_ca_translates_pinblock() {
        let ctx = Context::default();
        let fields = dispatch(&ctx, Request::Ca(make_ca_request())).unwrap();
        assert_eq!(fields.to_bytes(), b"CB0004EEBCB810144AEC3301".to_vec());
    }

    #[test]
    fn test_ca_rejects_format_change() {
        let ctx = Context::default();
        let mut req = make_ca_request();
        req.destination_pin_block_format = "03".to_string();
        let err = dispatch(&ctx, Request::Ca(req)).unwrap_err();
        assert!(matches!(err, HsmError::UnsupportedTranslation { .. }));
    }

    #[test]
    fn test_ca_rejects_non_iso0_format() {
        let ctx = Context::default();
        let mut req = make_ca_request();
        req.source_pin_block_format = "03".to_string();
        req.destination_pin_block_format = "03".to_string();
        let err = dispatch(&ctx, Request::Ca(req)).unwrap_err();
        assert!(matches!(err, HsmError::UnsupportedFormat(_)));
    }

    fn make_ca_request() -> CaRequest {
        use crate::message::commands::parse_body;
        let data = b"UED4A35D52C9063A1ED4A35D52C9063A1UD39D39EB7C932CF367C97C5B10B2C195127DF366B86AE2D9A70101552000000012";
        match parse_body("CA", data) {
            Request::Ca(req) => req,
            _ => unreachable!(),
        }
    }
}
