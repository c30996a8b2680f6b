// libretag/src/protocol/cipher.rs

//! Per-block stream cipher protecting FRAM of the Libre 2 family.
//!
//! Every 8 byte block is XORed with a key derived from the sensor UID, the
//! patch info and the block index. Applying [`decrypt`] twice yields the
//! original input.

use crate::constants::{BLOCK_SIZE, IMAGE_BLOCKS, IMAGE_LEN};
use crate::sensor::SensorVariant;
use crate::types::Uid;
use crate::{Error, Result};

/// Fixed key table
const KEY: [u16; 4] = [0xA0C5, 0x6860, 0x0000, 0x14C6];

/// Seed used for header and footer blocks of the US 14 day sensor
const US14DAY_FIXED_SEED: u16 = 0xCADC;

/// Minimum patch-info length consumed by the key schedule
pub const SENSOR_INFO_LEN: usize = 6;

/// First byte of the universal activation parameters
const ACTIVATION_MARKER: u8 = 0x1B;
const ACTIVATION_SALT: u16 = 0x1B6A;

fn word(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

fn op(value: u16) -> u16 {
    // the two low bits select which key words are folded back in
    let mut res = value >> 2;
    if value & 1 != 0 {
        res ^= KEY[1];
    }
    if value & 2 != 0 {
        res ^= KEY[0];
    }
    res
}

/// Run the mixing rounds on `[s1, s2, s3, s4]` and return `[f1, f2, f3, f4]`.
pub fn process_crypto(input: [u16; 4]) -> [u16; 4] {
    let [s1, s2, s3, s4] = input;

    let r0 = op(s1) ^ s4;
    let r1 = op(r0) ^ s3;
    let r2 = op(r1) ^ s2;
    let r3 = op(r2) ^ s1;
    let r4 = op(r3);
    let r5 = op(r4 ^ r0);
    let r6 = op(r5 ^ r1);
    let r7 = op(r6 ^ r2);

    [r0 ^ r4, r1 ^ r5, r2 ^ r6, r3 ^ r7]
}

fn block_seeds(variant: SensorVariant, id: &[u8; 8], info: &[u8], index: u16) -> Result<[u16; 4]> {
    let info_word = word(info[4], info[5]);
    let s1 = match variant {
        SensorVariant::LibreUS14Day if index < 3 || index >= 40 => US14DAY_FIXED_SEED,
        SensorVariant::LibreUS14Day => info_word,
        SensorVariant::Libre2 => word(id[4], id[5])
            .wrapping_add(info_word ^ 0x44)
            .wrapping_add(index),
        _ => return Err(Error::UnsupportedSensorType),
    };
    let s2 = word(id[2], id[3]).wrapping_add(KEY[2]);
    let s3 = word(id[0], id[1]).wrapping_add(index << 1);
    let s4 = 0x241A ^ KEY[3];
    Ok([s1, s2, s3, s4])
}

/// Decrypt the 43 block memory image of a Libre 2 or US 14 day sensor.
///
/// `info` is the patch info (at least six bytes), `data` exactly 344 bytes.
pub fn decrypt(variant: SensorVariant, id: &Uid, info: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if !variant.is_encrypted() {
        return Err(Error::UnsupportedSensorType);
    }
    if info.len() < SENSOR_INFO_LEN {
        return Err(Error::InvalidLength {
            expected: SENSOR_INFO_LEN,
            actual: info.len(),
        });
    }
    if data.len() != IMAGE_LEN {
        return Err(Error::InvalidLength {
            expected: IMAGE_LEN,
            actual: data.len(),
        });
    }

    let mut out = Vec::with_capacity(IMAGE_LEN);
    for (index, block) in (0..IMAGE_BLOCKS as u16).zip(data.chunks_exact(BLOCK_SIZE)) {
        let [f1, f2, f3, f4] = process_crypto(block_seeds(variant, id.as_bytes(), info, index)?);
        let keystream = [f4, f3, f2, f1]
            .into_iter()
            .flat_map(u16::to_le_bytes);
        out.extend(block.iter().zip(keystream).map(|(b, k)| b ^ k));
    }
    Ok(out)
}

/// Parameters of the activation command for the Libre 2 family.
///
/// Derived from the UID alone, so no password is needed.
pub fn activation_parameters(id: &Uid) -> [u8; 5] {
    let id = id.as_bytes();
    let x = u16::from(ACTIVATION_MARKER);
    let seeds = [
        word(id[4], id[5]).wrapping_add(x).wrapping_add(ACTIVATION_SALT),
        word(id[2], id[3]).wrapping_add(KEY[2]),
        word(id[0], id[1]).wrapping_add(x.wrapping_mul(2)),
        0x241A ^ KEY[3],
    ];
    let [f1, f2, _, _] = process_crypto(seeds);
    let [a, b] = (f1 ^ 0x4163).to_le_bytes();
    let [c, d] = (f2 ^ 0x4344).to_le_bytes();
    [ACTIVATION_MARKER, a, b, c, d]
}
