//! Tag-length-value formatting for EMV merchant-presented payloads.
//!
//! Every field is `ID` (two digits) + `LEN` (two digits, zero padded, byte
//! count of the value) + `VALUE`. Templates such as field 26 nest by using the
//! concatenation of their inner fields as the outer value.

use crate::error::{PixError, Result};

/// Largest value length representable by the two-digit length prefix.
pub const MAX_VALUE_LEN: usize = 99;

/// Formats a single `id + length + value` field.
///
/// Fails if `id` is not two ASCII digits or `value` is longer than
/// [`MAX_VALUE_LEN`] bytes.
///
/// ```
/// use pix_brcode::tlv::format_field;
///
/// assert_eq!(format_field("58", "BR").unwrap(), "5802BR");
/// ```
pub fn format_field(id: &str, value: &str) -> Result<String> {
    if id.len() != 2 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PixError::InvalidFieldId(id.to_string()));
    }

    let len = value.len();
    if len > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            id: id.to_string(),
            len,
        });
    }

    Ok(format!("{}{:02}{}", id, len, value))
}

/// Append-only buffer of formatted TLV fields.
///
/// Used both for the top-level payload and for template values.
#[derive(Debug, Default, Clone)]
pub struct TlvBuilder {
    buf: String,
}

impl TlvBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        TlvBuilder { buf: String::new() }
    }

    /// Appends a field.
    pub fn push(&mut self, id: &str, value: &str) -> Result<&mut Self> {
        let field = format_field(id, value)?;
        self.buf.push_str(&field);
        Ok(self)
    }

    /// Appends a field only when `value` is `Some`.
    pub fn push_opt(&mut self, id: &str, value: Option<&str>) -> Result<&mut Self> {
        match value {
            Some(v) => self.push(id, v),
            None => Ok(self),
        }
    }

    /// Appends raw text without a TLV header.
    ///
    /// Only used for the CRC placeholder, whose value is not known yet.
    pub(crate) fn push_raw(&mut self, raw: &str) -> &mut Self {
        self.buf.push_str(raw);
        self
    }

    /// Returns the fields formatted so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the builder and returns the concatenated fields.
    pub fn finish(self) -> String {
        self.buf
    }
}
