//! CRC-16 as used by RTU framing.
//!
//! Reflected polynomial 0xA001 with the register seeded at 0xFFFF. The
//! value returned by [`compute`] is the register with its bytes swapped, so
//! `compute(data).to_be_bytes()` yields the checksum bytes in wire order
//! (low register byte first).

use std::sync::LazyLock;

/// Reflected CRC-16 polynomial.
pub const POLYNOMIAL: u16 = 0xA001;

/// Initial register value.
pub const SEED: u16 = 0xFFFF;

static TABLE: LazyLock<[u16; 256]> = LazyLock::new(build_table);

/// Build the 256-entry lookup table.
pub fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    for (index, entry) in table.iter_mut().enumerate() {
        let mut crc = index as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
        }
        *entry = crc;
    }
    table
}

/// The process-wide lookup table, built on first use.
pub fn table() -> &'static [u16; 256] {
    &TABLE
}

/// Compute the checksum of `data` in wire order.
pub fn compute(data: &[u8]) -> u16 {
    let table = table();
    let crc = data.iter().fold(SEED, |crc, &byte| {
        (crc >> 8) ^ table[usize::from((crc ^ u16::from(byte)) as u8)]
    });
    crc.swap_bytes()
}

/// Returns true if `expected` is the checksum of `data`.
pub fn verify(data: &[u8], expected: u16) -> bool {
    compute(data) == expected
}
