//! Batch encoding of payment requests read from CSV.
//!
//! Rows are processed in input order. A row that cannot be parsed or encoded
//! is logged at warn level and skipped, so one bad invoice never blocks the
//! rest of the batch.

use crate::amount::Amount;
use crate::encoder::encode_pix_payload;
use crate::error::Result;
use crate::request::PaymentRecord;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};

/// A successfully encoded row.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedPayment {
    /// 1-indexed CSV line number of the source row.
    pub row: usize,

    /// Reference label that went into field 62.
    pub transaction_id: String,

    /// Amount emitted in field 54, if any.
    pub amount: Option<Amount>,

    /// The full BR Code string.
    pub payload: String,
}

/// Streams payment requests from CSV and collects their BR Code payloads.
pub struct BatchEncoder {
    payments: Vec<EncodedPayment>,
    skipped: usize,
}

impl BatchEncoder {
    /// Creates an empty batch.
    pub fn new() -> Self {
        BatchEncoder {
            payments: Vec::new(),
            skipped: 0,
        }
    }

    /// Processes requests from a CSV reader in streaming fashion.
    ///
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<PaymentRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Err(e) = self.process_record(&record, row_num) {
                        warn!("Row {}: {}", row_num, e);
                        self.skipped += 1;
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    self.skipped += 1;
                }
            }
        }

        debug!(
            "Encoded {} payloads, skipped {} rows",
            self.payments.len(),
            self.skipped
        );
        Ok(())
    }

    fn process_record(&mut self, record: &PaymentRecord, row: usize) -> Result<()> {
        let request = record.to_request()?;
        let payload = encode_pix_payload(&request)?;

        self.payments.push(EncodedPayment {
            row,
            transaction_id: request.reference_label(),
            amount: request.amount.filter(|a| a.is_positive()),
            payload,
        });
        Ok(())
    }

    /// Writes encoded payloads to CSV in input order.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        // Written by hand so an empty batch still gets a header line
        csv_writer.write_record(["row", "transaction_id", "amount", "payload"])?;

        for payment in &self.payments {
            csv_writer.serialize(payment)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Encoded payments collected so far.
    pub fn payments(&self) -> &[EncodedPayment] {
        &self.payments
    }

    /// Number of rows that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Default for BatchEncoder {
    fn default() -> Self {
        Self::new()
    }
}
