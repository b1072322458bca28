//! # PIX BR Code
//!
//! Encoder for the Brazilian PIX "Copia e Cola" payload, the EMV
//! Merchant-Presented QR string (EMV QRCPS-MPM) as profiled by the BR Code.
//!
//! ## Design Principles
//!
//! - **Fixed field order**: fields are emitted in the order scanners expect
//! - **Byte-exact lengths**: TLV lengths count UTF-8 bytes and never exceed 99
//! - **ASCII free text**: merchant name, city and description lose diacritics
//!   and any non-ASCII residue before being clamped
//! - **Explicit failure**: incomplete requests return `PixError` rather than an
//!   empty or malformed payload
//!
//! ## Example
//!
//! ```
//! use pix_brcode::{Amount, PixPaymentRequest};
//!
//! let payload = PixPaymentRequest::new("teste@exemplo.com", "Loja Exemplo", "São Paulo")
//!     .with_amount(Amount::from_cents(1050))
//!     .with_transaction_id("TX123")
//!     .encode()
//!     .unwrap();
//!
//! assert!(payload.contains("6009Sao Paulo"));
//! assert!(payload.ends_with("63042CFA"));
//! ```

pub mod amount;
pub mod batch;
pub mod crc;
pub mod encoder;
pub mod error;
pub mod normalize;
pub mod request;
pub mod tlv;

pub use amount::Amount;
pub use batch::{BatchEncoder, EncodedPayment};
pub use encoder::encode_pix_payload;
pub use error::{PixError, Result};
pub use request::{PaymentRecord, PixPaymentRequest};
