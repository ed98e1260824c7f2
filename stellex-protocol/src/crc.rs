//! Packet checksum
//!
//! CRC-16 as used by IrDA LAP and PPP: reflected polynomial 0x8408, seeded
//! with 0xFFFF, result complemented. The display sends the low byte first.

/// Reflected form of the CCITT polynomial x^16 + x^12 + x^5 + 1
const POLY_REFLECTED: u16 = 0x8408;

/// Accumulator seed
const SEED: u16 = 0xFFFF;

/// Byte-wise lookup table, built at compile time
static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLY_REFLECTED
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the packet checksum over `bytes`
pub fn checksum(bytes: &[u8]) -> u16 {
    let mut acc = SEED;
    for &byte in bytes {
        acc = (acc >> 8) ^ TABLE[((acc ^ byte as u16) & 0xFF) as usize];
    }
    !acc
}
