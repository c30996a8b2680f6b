//! Hexadecimal helpers used for session logs and display purposes.
//!
//! All rendering is uppercase, matching the notation used for patch info
//! prefixes ("DF 00 00") and FRAM dumps.

use std::fmt::Write;

use crate::constants::{BLOCK_SIZE, FRAM_DUMP_BASE_ADDRESS};

/// Convert a byte slice to an uppercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"DEAD"`
pub fn bytes_to_hex_upper(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Convert a byte slice to an uppercase hex string with a single space
/// between each byte.
///
/// Example: `&[0xde, 0xad]` -> `"DE AD"`
pub fn bytes_to_hex_upper_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Render a FRAM dump, one line per 8 byte block:
/// `"F860 00: DF 00 ..."` (address, block number, contents).
///
/// A trailing partial block is not rendered.
pub fn fram_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for (number, block) in bytes.chunks_exact(BLOCK_SIZE).enumerate() {
        let _ = writeln!(
            &mut out,
            "{:04X} {:02X}: {}",
            FRAM_DUMP_BASE_ADDRESS + number * BLOCK_SIZE,
            number,
            bytes_to_hex_upper_spaced(block)
        );
    }
    out
}
