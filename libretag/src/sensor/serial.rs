// libretag/src/sensor/serial.rs

use super::SensorVariant;
use crate::types::Uid;

/// Alphabet of the printed serial number (no B, I, O or S)
const ALPHABET: &[u8; 32] = b"0123456789ACDEFGHJKLMNPQRTUVWXYZ";

const SERIAL_CHARS: usize = 10;

/// Serial number printed on the sensor, derived from its UID.
///
/// The six low UID bytes, most significant first and padded with two zero
/// bytes, are read as ten 5-bit alphabet indices after the family digit.
pub fn serial_number(uid: &Uid, variant: SensorVariant) -> String {
    let id = uid.as_bytes();
    let bits = u64::from_be_bytes([id[5], id[4], id[3], id[2], id[1], id[0], 0, 0]);

    let mut serial = String::with_capacity(SERIAL_CHARS + 1);
    serial.push(variant.serial_prefix());
    for i in 0..SERIAL_CHARS {
        let index = (bits >> (64 - 5 * (i + 1))) & 0x1F;
        serial.push(char::from(ALPHABET[index as usize]));
    }
    serial
}
