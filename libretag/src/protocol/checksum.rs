// libretag/src/protocol/checksum.rs

//! CRC16 guarding each section of tag memory.
//!
//! The tag stores the checksum of `section[2..]` little-endian in the first
//! two bytes of the section. The algorithm is the reflected CCITT polynomial
//! (0x8408) seeded with 0xFFFF and no final xor, with the 16-bit result
//! bit-reversed before it is stored.

/// Seed of the section checksum
pub const CRC16_SEED: u16 = 0xFFFF;

const CRC16_POLY_REFLECTED: u16 = 0x8408;

const CRC16_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u16;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC16_POLY_REFLECTED
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

/// Compute the tag checksum over `data`.
pub fn checksum(data: &[u8]) -> u16 {
    let crc = data.iter().fold(CRC16_SEED, |crc, &b| {
        (crc >> 8) ^ CRC16_TABLE[((crc ^ u16::from(b)) & 0xff) as usize]
    });
    crc.reverse_bits()
}

/// Checksum stored in the first two bytes of a section, if present.
pub fn stored_checksum(section: &[u8]) -> Option<u16> {
    match section {
        [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

/// True if the stored checksum matches the one computed over `section[2..]`.
///
/// Sections shorter than two bytes are never valid.
pub fn is_valid(section: &[u8]) -> bool {
    stored_checksum(section).is_some_and(|stored| stored == checksum(&section[2..]))
}

/// Rewrite `section[0..2]` in place with the checksum of `section[2..]`.
pub fn stamp_checksum(section: &mut [u8]) {
    if section.len() < 2 {
        return;
    }
    let crc = checksum(&section[2..]).to_le_bytes();
    section[..2].copy_from_slice(&crc);
}

/// Copy of `section` with a recomputed checksum; the remainder is unchanged.
pub fn with_correct_checksum(section: &[u8]) -> Vec<u8> {
    let mut out = section.to_vec();
    stamp_checksum(&mut out);
    out
}
