//! BR Code payload assembly.
//!
//! Fields are emitted in the fixed order scanners expect, ending with the
//! CRC16 of everything before it (including the `6304` header of the CRC
//! field itself).

use crate::crc::checksum_hex;
use crate::error::{PixError, Result};
use crate::normalize::{to_emv_text, MERCHANT_CITY_MAX, MERCHANT_NAME_MAX};
use crate::request::PixPaymentRequest;
use crate::tlv::{format_field, TlvBuilder, MAX_VALUE_LEN};
use log::debug;

/// Top-level and template field ids.
pub mod ids {
    pub const PAYLOAD_FORMAT_INDICATOR: &str = "00";
    pub const MERCHANT_ACCOUNT_INFO: &str = "26";
    pub const MERCHANT_CATEGORY_CODE: &str = "52";
    pub const TRANSACTION_CURRENCY: &str = "53";
    pub const TRANSACTION_AMOUNT: &str = "54";
    pub const COUNTRY_CODE: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const CRC16: &str = "63";

    // Inside 26
    pub const GUI: &str = "00";
    pub const PIX_KEY: &str = "01";
    pub const DESCRIPTION: &str = "02";

    // Inside 62
    pub const REFERENCE_LABEL: &str = "05";
}

pub const PAYLOAD_FORMAT_VERSION: &str = "01";
pub const PIX_GUI: &str = "br.gov.bcb.pix";
pub const CATEGORY_CODE_UNSPECIFIED: &str = "0000";
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_BR: &str = "BR";

/// EMV limit for the formatted amount in field 54.
pub const AMOUNT_MAX_LEN: usize = 13;

/// Header of the CRC field: id `63`, length `04`.
const CRC_PLACEHOLDER: &str = "6304";

/// Encodes `request` into a checksummed BR Code string.
///
/// Required fields are validated first; a blank PIX key, merchant name or
/// merchant city yields [`PixError::InvalidRequest`] instead of a payload.
///
/// # Example
///
/// ```
/// use pix_brcode::{encode_pix_payload, Amount, PixPaymentRequest};
///
/// let request = PixPaymentRequest::new("teste@exemplo.com", "Loja Exemplo", "Sao Paulo")
///     .with_amount(Amount::from_cents(1050))
///     .with_transaction_id("TX123");
///
/// let payload = encode_pix_payload(&request).unwrap();
/// assert!(payload.starts_with("000201"));
/// assert!(payload.contains("540510.50"));
/// ```
pub fn encode_pix_payload(request: &PixPaymentRequest) -> Result<String> {
    request.validate()?;

    let merchant_name = normalized_required(
        "merchant_name",
        &request.merchant_name,
        MERCHANT_NAME_MAX,
    )?;
    let merchant_city = normalized_required(
        "merchant_city",
        &request.merchant_city,
        MERCHANT_CITY_MAX,
    )?;
    let description = request
        .description
        .as_deref()
        .map(|d| to_emv_text(d, MAX_VALUE_LEN))
        .filter(|d| !d.is_empty());
    let reference = request.reference_label();
    let amount = match request.amount.filter(|a| a.is_positive()) {
        Some(amount) => {
            let text = amount.to_string();
            if text.len() > AMOUNT_MAX_LEN {
                return Err(PixError::AmountTooLarge(text));
            }
            Some(text)
        }
        None => None,
    };

    let mut account_info = TlvBuilder::new();
    account_info
        .push(ids::GUI, PIX_GUI)?
        .push(ids::PIX_KEY, &request.pix_key)?
        .push_opt(ids::DESCRIPTION, description.as_deref())?;

    let mut additional_data = TlvBuilder::new();
    additional_data.push(ids::REFERENCE_LABEL, &reference)?;

    let mut payload = TlvBuilder::new();
    payload
        .push(ids::PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT_VERSION)?
        .push(ids::MERCHANT_ACCOUNT_INFO, account_info.as_str())?
        .push(ids::MERCHANT_CATEGORY_CODE, CATEGORY_CODE_UNSPECIFIED)?
        .push(ids::TRANSACTION_CURRENCY, CURRENCY_BRL)?
        .push_opt(ids::TRANSACTION_AMOUNT, amount.as_deref())?
        .push(ids::COUNTRY_CODE, COUNTRY_BR)?
        .push(ids::MERCHANT_NAME, &merchant_name)?
        .push(ids::MERCHANT_CITY, &merchant_city)?
        .push(ids::ADDITIONAL_DATA, additional_data.as_str())?;

    let crc = checksum_hex(payload.push_raw(CRC_PLACEHOLDER).as_str());
    let mut encoded = payload.finish();
    encoded.truncate(encoded.len() - CRC_PLACEHOLDER.len());
    encoded.push_str(&format_field(ids::CRC16, &crc)?);

    debug!("Encoded PIX payload for reference {}: {}", reference, encoded);
    Ok(encoded)
}

/// Normalizes a required free-text field, failing if nothing survives.
fn normalized_required(field: &'static str, value: &str, max_chars: usize) -> Result<String> {
    let normalized = to_emv_text(value, max_chars);
    if normalized.trim().is_empty() {
        return Err(PixError::InvalidRequest {
            field,
            message: format!("has no characters representable in a BR Code: {:?}", value),
        });
    }
    if normalized != value {
        debug!("Normalized {} {:?} to {:?}", field, value, normalized);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    fn sample() -> PixPaymentRequest {
        PixPaymentRequest::new("teste@exemplo.com", "Loja Exemplo", "Sao Paulo")
    }

    #[test]
    fn test_full_payload_matches_reference() {
        let request = sample()
            .with_amount(Amount::from_cents(1050))
            .with_transaction_id("TX123");

        assert_eq!(
            encode_pix_payload(&request).unwrap(),
            "00020126390014br.gov.bcb.pix0117teste@exemplo.com\
             520400005303986540510.505802BR5912Loja Exemplo\
             6009Sao Paulo62090505TX12363042CFA"
        );
    }

    #[test]
    fn test_minimal_payload_matches_reference() {
        assert_eq!(
            encode_pix_payload(&sample()).unwrap(),
            "00020126390014br.gov.bcb.pix0117teste@exemplo.com\
             5204000053039865802BR5912Loja Exemplo6009Sao Paulo\
             62070503***63040C32"
        );
    }

    #[test]
    fn test_description_goes_inside_account_info() {
        let request = PixPaymentRequest::new("12345678900", "Joaquim José", "São Paulo")
            .with_amount(Amount::from_cents(15000))
            .with_transaction_id("INV42")
            .with_description("Fatura 42");

        assert_eq!(
            encode_pix_payload(&request).unwrap(),
            "00020126460014br.gov.bcb.pix0111123456789000209Fatura 42\
             5204000053039865406150.005802BR5912Joaquim Jose\
             6009Sao Paulo62090505INV426304F347"
        );
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let with_empty = sample().with_description("");
        assert_eq!(
            encode_pix_payload(&with_empty).unwrap(),
            encode_pix_payload(&sample()).unwrap()
        );
    }

    #[test]
    fn test_non_positive_amount_is_omitted() {
        let baseline = encode_pix_payload(&sample()).unwrap();
        for cents in [0, -100] {
            let request = sample().with_amount(Amount::from_cents(cents));
            assert_eq!(encode_pix_payload(&request).unwrap(), baseline);
        }
    }

    #[test]
    fn test_amount_too_large() {
        let request = sample().with_amount(Amount::from_cents(10_000_000_000_000));
        assert!(matches!(
            encode_pix_payload(&request),
            Err(PixError::AmountTooLarge(_))
        ));

        // 13 characters is still accepted
        let request = sample().with_amount(Amount::from_cents(999_999_999_999));
        assert!(encode_pix_payload(&request)
            .unwrap()
            .contains("54139999999999.99"));
    }

    #[test]
    fn test_unrepresentable_name_is_rejected() {
        let request = PixPaymentRequest::new("key", "北京", "Sao Paulo");
        assert!(matches!(
            encode_pix_payload(&request),
            Err(PixError::InvalidRequest {
                field: "merchant_name",
                ..
            })
        ));
    }

    #[test]
    fn test_long_key_and_description_rejected() {
        let request = sample().with_description("x".repeat(60));
        assert!(matches!(
            encode_pix_payload(&request),
            Err(PixError::FieldTooLong { id, .. }) if id == "26"
        ));
    }
}
