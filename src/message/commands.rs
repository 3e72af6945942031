//! Command-specific field schemas.
//!
//! Each supported command code is parsed into its own struct with typed,
//! named fields, rather than a single dictionary-typed bag — handlers then
//! consume fields directly instead of looking them up by string key at use
//! time. An unrecognized command code parses to [`Request::Unknown`].

use crate::message::fields::{take, take_key_field, take_until_semicolon, FieldList, ANY_TAG, U_ONLY};

fn field_str(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Verify PIN (`DC`) request fields.
#[derive(Debug, Clone)]
pub struct DcRequest {
    pub tpk: String,
    pub pvk_pair: String,
    pub pin_block: String,
    pub pin_block_format_code: String,
    pub account_number: String,
    pub pvki: String,
    pub pvv: String,
    pub raw: FieldList,
}

/// Translate PIN block (`CA`) request fields.
#[derive(Debug, Clone)]
pub struct CaRequest {
    pub tpk: String,
    pub destination_key: String,
    /// Parsed but, per this simulator's resolution of an open question in
    /// the command set it imitates, never enforced against the decoded PIN
    /// length — retained on the struct for wire fidelity only.
    pub maximum_pin_length: String,
    pub source_pin_block: String,
    pub source_pin_block_format: String,
    pub destination_pin_block_format: String,
    pub account_number: String,
    pub raw: FieldList,
}

/// Verify CVV (`CY`) request fields.
#[derive(Debug, Clone)]
pub struct CyRequest {
    pub cvk: String,
    pub cvv: String,
    pub primary_account_number: String,
    pub expiration_date: String,
    pub service_code: String,
    pub raw: FieldList,
}

/// A parsed request: the command code plus its typed fields.
#[derive(Debug, Clone)]
pub enum Request {
    Nc,
    Dc(DcRequest),
    Ca(CaRequest),
    Cy(CyRequest),
    /// Any command code not in the supported set. Carries the code for
    /// logging; the dispatcher routes it to the generic `ZZ` response.
    Unknown(String),
}

pub fn parse_body(command_code: &str, body: &[u8]) -> Request {
    match command_code {
        "DC" => Request::Dc(parse_dc(body)),
        "CA" => Request::Ca(parse_ca(body)),
        "CY" => Request::Cy(parse_cy(body)),
        "NC" => Request::Nc,
        other => Request::Unknown(other.to_string()),
    }
}

fn parse_dc(body: &[u8]) -> DcRequest {
    let mut raw = FieldList::new();

    let (tpk, rest) = take_key_field(body, ANY_TAG);
    raw.push("TPK", tpk.to_vec());

    let (pvk_pair, rest) = take_key_field(rest, U_ONLY);
    raw.push("PVK Pair", pvk_pair.to_vec());

    let (pin_block, rest) = take(rest, 16);
    raw.push("PIN block", pin_block.to_vec());

    let (pin_block_format_code, rest) = take(rest, 2);
    raw.push("PIN block format code", pin_block_format_code.to_vec());

    let (account_number, rest) = take(rest, 12);
    raw.push("Account Number", account_number.to_vec());

    let (pvki, rest) = take(rest, 1);
    raw.push("PVKI", pvki.to_vec());

    let (pvv, _rest) = take(rest, 4);
    raw.push("PVV", pvv.to_vec());

    DcRequest {
        tpk: field_str(tpk),
        pvk_pair: field_str(pvk_pair),
        pin_block: field_str(pin_block),
        pin_block_format_code: field_str(pin_block_format_code),
        account_number: field_str(account_number),
        pvki: field_str(pvki),
        pvv: field_str(pvv),
        raw,
    }
}

fn parse_ca(body: &[u8]) -> CaRequest {
    let mut raw = FieldList::new();

    let (tpk, rest) = take_key_field(body, ANY_TAG);
    raw.push("TPK", tpk.to_vec());

    let (destination_key, rest) = take_key_field(rest, U_ONLY);
    raw.push("Destination Key", destination_key.to_vec());

    let (maximum_pin_length, rest) = take(rest, 2);
    raw.push("Maximum PIN Length", maximum_pin_length.to_vec());

    let (source_pin_block, rest) = take(rest, 16);
    raw.push("Source PIN block", source_pin_block.to_vec());

    let (source_pin_block_format, rest) = take(rest, 2);
    raw.push("Source PIN block format", source_pin_block_format.to_vec());

    let (destination_pin_block_format, rest) = take(rest, 2);
    raw.push(
        "Destination PIN block format",
        destination_pin_block_format.to_vec(),
    );

    let (account_number, _rest) = take(rest, 12);
    raw.push("Account Number", account_number.to_vec());

    CaRequest {
        tpk: field_str(tpk),
        destination_key: field_str(destination_key),
        maximum_pin_length: field_str(maximum_pin_length),
        source_pin_block: field_str(source_pin_block),
        source_pin_block_format: field_str(source_pin_block_format),
        destination_pin_block_format: field_str(destination_pin_block_format),
        account_number: field_str(account_number),
        raw,
    }
}

fn parse_cy(body: &[u8]) -> CyRequest {
    let mut raw = FieldList::new();

    let (cvk, rest) = take_key_field(body, ANY_TAG);
    raw.push("CVK", cvk.to_vec());

    let (cvv, rest) = take(rest, 3);
    raw.push("CVV", cvv.to_vec());

    let (pan, rest) = take_until_semicolon(rest);
    raw.push("Primary Account Number", pan.to_vec());

    let (expiration_date, rest) = take(rest, 4);
    raw.push("Expiration Date", expiration_date.to_vec());

    let (service_code, _rest) = take(rest, 3);
    raw.push("Service Code", service_code.to_vec());

    CyRequest {
        cvk: field_str(cvk),
        cvv: field_str(cvv),
        primary_account_number: field_str(pan),
        expiration_date: field_str(expiration_date),
        service_code: field_str(service_code),
        raw,
    }
}
