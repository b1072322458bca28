//! Payment request models: the encoder input and its raw CSV form.

use crate::amount::Amount;
use crate::error::{PixError, Result};
use crate::normalize::{to_emv_text, REFERENCE_LABEL_MAX};
use serde::Deserialize;

/// Reference label used when the caller does not supply a transaction id.
pub const DEFAULT_TRANSACTION_ID: &str = "***";

/// Parameters for a static PIX payment payload.
///
/// Built once per encode call with [`PixPaymentRequest::new`] and the
/// `with_*` methods. Required fields are checked by [`validate`] before any
/// assembly happens.
///
/// [`validate`]: PixPaymentRequest::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixPaymentRequest {
    /// PIX key of the receiver (email, phone, CPF/CNPJ or random key). Opaque.
    pub pix_key: String,

    /// Merchant name, emitted as field 59.
    pub merchant_name: String,

    /// Merchant city, emitted as field 60.
    pub merchant_city: String,

    /// Transaction amount; omitted from the payload unless positive.
    pub amount: Option<Amount>,

    /// Reference label; `"***"` when absent or nothing printable remains.
    pub transaction_id: Option<String>,

    /// Free-text description carried inside field 26.
    pub description: Option<String>,
}

impl PixPaymentRequest {
    /// Creates a request with the three required fields.
    pub fn new(
        pix_key: impl Into<String>,
        merchant_name: impl Into<String>,
        merchant_city: impl Into<String>,
    ) -> Self {
        PixPaymentRequest {
            pix_key: pix_key.into(),
            merchant_name: merchant_name.into(),
            merchant_city: merchant_city.into(),
            amount: None,
            transaction_id: None,
            description: None,
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the reference label emitted in field 62.
    ///
    /// The transaction id is reduced to printable ASCII and clamped to 25
    /// characters; `"***"` is used when it is absent or nothing survives.
    pub fn reference_label(&self) -> String {
        self.transaction_id
            .as_deref()
            .map(|id| to_emv_text(id, REFERENCE_LABEL_MAX))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_TRANSACTION_ID.to_string())
    }

    /// Checks that the required fields are not blank.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("pix_key", &self.pix_key)?;
        require_non_blank("merchant_name", &self.merchant_name)?;
        require_non_blank("merchant_city", &self.merchant_city)?;
        Ok(())
    }

    /// Encodes this request into a BR Code payload.
    pub fn encode(&self) -> Result<String> {
        crate::encoder::encode_pix_payload(self)
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PixError::InvalidRequest {
            field,
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Raw payment request as read from CSV.
///
/// Only the three required columns must be present in the header. `amount` is
/// in reais, `amount_cents` in centavos; a row may carry at most one of them.
#[derive(Debug, Deserialize)]
pub struct PaymentRecord {
    pub pix_key: String,

    pub merchant_name: String,

    pub merchant_city: String,

    #[serde(default)]
    pub amount: Option<Amount>,

    #[serde(default)]
    pub amount_cents: Option<i64>,

    #[serde(default)]
    pub transaction_id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl PaymentRecord {
    /// Converts the raw record into a validated request.
    pub fn to_request(&self) -> Result<PixPaymentRequest> {
        let amount = match (self.amount, self.amount_cents) {
            (Some(_), Some(_)) => {
                return Err(PixError::InvalidRequest {
                    field: "amount",
                    message: "cannot be combined with amount_cents".to_string(),
                })
            }
            (Some(reais), None) => Some(reais),
            (None, Some(cents)) => Some(Amount::from_cents(cents)),
            (None, None) => None,
        };

        let request = PixPaymentRequest {
            pix_key: self.pix_key.clone(),
            merchant_name: self.merchant_name.clone(),
            merchant_city: self.merchant_city.clone(),
            amount,
            transaction_id: non_empty(&self.transaction_id),
            description: non_empty(&self.description),
        };
        request.validate()?;
        Ok(request)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record() -> PaymentRecord {
        PaymentRecord {
            pix_key: "teste@exemplo.com".to_string(),
            merchant_name: "Loja Exemplo".to_string(),
            merchant_city: "Sao Paulo".to_string(),
            amount: None,
            amount_cents: None,
            transaction_id: None,
            description: None,
        }
    }

    #[test]
    fn test_builder_sets_optional_fields() {
        let request = PixPaymentRequest::new("key", "Name", "City")
            .with_amount(Amount::from_cents(500))
            .with_transaction_id("TX1")
            .with_description("Order 1");

        assert_eq!(request.amount, Some(Amount::from_cents(500)));
        assert_eq!(request.transaction_id.as_deref(), Some("TX1"));
        assert_eq!(request.description.as_deref(), Some("Order 1"));
    }

    #[test]
    fn test_reference_label_default() {
        let request = PixPaymentRequest::new("key", "Name", "City");
        assert_eq!(request.reference_label(), "***");

        let request = request.with_transaction_id("");
        assert_eq!(request.reference_label(), "***");
    }

    #[test]
    fn test_reference_label_is_ascii_and_clamped() {
        let request = PixPaymentRequest::new("key", "Name", "City");

        let accented = request.clone().with_transaction_id("Pedido-ção");
        assert_eq!(accented.reference_label(), "Pedido-cao");

        let long = request.clone().with_transaction_id("A".repeat(30));
        assert_eq!(long.reference_label(), "A".repeat(25));

        let emoji = request.with_transaction_id("😀".repeat(25));
        assert_eq!(emoji.reference_label(), "***");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let cases = [
            (PixPaymentRequest::new("", "Name", "City"), "pix_key"),
            (PixPaymentRequest::new("key", "  ", "City"), "merchant_name"),
            (PixPaymentRequest::new("key", "Name", ""), "merchant_city"),
        ];

        for (request, expected) in cases {
            match request.validate() {
                Err(PixError::InvalidRequest { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected InvalidRequest for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_record_with_amount_in_reais() {
        let mut rec = record();
        rec.amount = Some(Amount::from_str("10.5").unwrap());

        let request = rec.to_request().unwrap();
        assert_eq!(request.amount.unwrap().to_string(), "10.50");
    }

    #[test]
    fn test_record_with_amount_in_cents() {
        let mut rec = record();
        rec.amount_cents = Some(15000);

        let request = rec.to_request().unwrap();
        assert_eq!(request.amount.unwrap().to_string(), "150.00");
    }

    #[test]
    fn test_record_rejects_both_amounts() {
        let mut rec = record();
        rec.amount = Some(Amount::from_cents(100));
        rec.amount_cents = Some(100);

        assert!(matches!(
            rec.to_request(),
            Err(PixError::InvalidRequest { field: "amount", .. })
        ));
    }

    #[test]
    fn test_record_blank_optionals_become_none() {
        let mut rec = record();
        rec.transaction_id = Some("   ".to_string());
        rec.description = Some(String::new());

        let request = rec.to_request().unwrap();
        assert_eq!(request.transaction_id, None);
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_record_missing_key_is_invalid() {
        let mut rec = record();
        rec.pix_key = String::new();

        assert!(matches!(
            rec.to_request(),
            Err(PixError::InvalidRequest { field: "pix_key", .. })
        ));
    }
}
