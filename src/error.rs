//! Error types for the BR Code encoder.

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, PixError>;

/// Errors that can occur while building or encoding a PIX payload.
#[derive(Error, Debug)]
pub enum PixError {
    /// A required request field is missing or unusable
    #[error("Invalid request: {field} {message}")]
    InvalidRequest {
        field: &'static str,
        message: String,
    },

    /// TLV field id is not exactly two ASCII digits
    #[error("Invalid field id {0:?}: expected two ASCII digits")]
    InvalidFieldId(String),

    /// TLV value does not fit the two-digit length prefix
    #[error("Field {id} is {len} bytes long, maximum is 99")]
    FieldTooLong { id: String, len: usize },

    /// Amount could not be parsed or is not a finite number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Formatted amount exceeds the 13 characters allowed for field 54
    #[error("Amount {0} exceeds 13 characters")]
    AmountTooLarge(String),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: pix-brcode <requests.csv | ->")]
    MissingArgument,
}
