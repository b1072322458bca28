//! CRC-16/CCITT-FALSE checksum used by field 63 of a BR Code.

use ::crc::{Crc, CRC_16_IBM_3740};

// IBM-3740 is the catalog name for CCITT-FALSE: poly 0x1021, init 0xFFFF,
// no reflection, no final XOR.
const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Computes CRC-16/CCITT-FALSE over `bytes`.
pub fn crc16_ccitt_false(bytes: &[u8]) -> u16 {
    CRC.checksum(bytes)
}

/// Checksums the UTF-8 bytes of `payload` and renders the result as four
/// uppercase, zero-padded hex digits.
pub fn checksum_hex(payload: &str) -> String {
    format!("{:04X}", crc16_ccitt_false(payload.as_bytes()))
}
