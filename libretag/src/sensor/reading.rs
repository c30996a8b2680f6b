// libretag/src/sensor/reading.rs

//! Decoder for the 344 byte memory image.
//!
//! Layout: header `[0..24)`, body `[24..320)`, footer `[320..344)`, each
//! section guarded by its own checksum. Inside the body, byte 2 and 3 point
//! at the next trend and history slot, the trend ring (16 records) starts at
//! offset 4, the history ring (32 records) at offset 100 and the minute
//! counter sits at offset 292. Records are 6 bytes wide.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use super::{SensorVariant, serial};
use crate::constants::{BODY_RANGE, FOOTER_RANGE, HEADER_RANGE, IMAGE_LEN};
use crate::protocol::checksum;
use crate::types::{SensorRegion, SensorState, Uid};
use crate::utils::bytes_to_hex_upper;
use crate::{Error, Result};

/// Size of one glucose record
pub const RECORD_LEN: usize = 6;
/// Body offset of the trend ring
pub const TREND_OFFSET: usize = 4;
/// Records in the trend ring, one per minute
pub const TREND_RECORDS: usize = 16;
/// Body offset of the history ring
pub const HISTORY_OFFSET: usize = 100;
/// Records in the history ring, one per 15 minutes
pub const HISTORY_RECORDS: usize = 32;

const NEXT_TREND_OFFSET: usize = 2;
const NEXT_HISTORY_OFFSET: usize = 3;
const MINUTES_OFFSET: usize = 292;
const STATE_OFFSET: usize = 4;
const FOOTER_REGION_OFFSET: usize = 3;
const FOOTER_MAX_LIFE_OFFSET: usize = 6;

/// History values are produced every 15 minutes, 3 minutes late.
const HISTORY_INTERVAL_MINUTES: i64 = 15;
const HISTORY_DELAY_MINUTES: i64 = 3;

/// Glucose value of a raw record word: 14 bit reading, scaled and offset.
///
/// Raw values below the offset saturate at zero.
pub fn glucose(raw: u16) -> u16 {
    ((raw & 0x3FFF) / 6).saturating_sub(37)
}

/// Rotate ring slots so the slot at `next` (the oldest) comes first.
///
/// `next` beyond the ring is reduced modulo its length.
pub fn chronological<T: Clone>(slots: &[T], next: usize) -> Vec<T> {
    if slots.is_empty() {
        return Vec::new();
    }
    let next = next % slots.len();
    slots[next..].iter().chain(&slots[..next]).cloned().collect()
}

/// Glucose values of a ring buffer of 6 byte records, oldest first.
pub fn decode_ring(ring: &[u8], next: usize) -> Vec<u16> {
    let values: Vec<u16> = ring
        .chunks_exact(RECORD_LEN)
        .map(|record| glucose(u16::from_le_bytes([record[0], record[1]])))
        .collect();
    chronological(&values, next)
}

/// Structured telemetry decoded from one memory image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    uid: Uid,
    serial_number: String,
    patch_info: Option<String>,
    bytes: Vec<u8>,
    date: DateTime<Utc>,
    minutes_since_start: u16,
    next_trend_block: u8,
    next_history_block: u8,
    header_crc_valid: bool,
    body_crc_valid: bool,
    footer_crc_valid: bool,
}

impl SensorReading {
    /// Decode a plaintext image read at `date`.
    ///
    /// Only a length other than 344 bytes is an error; checksum mismatches
    /// are reported through the `*_crc_valid` flags.
    pub fn decode(
        bytes: &[u8],
        uid: Uid,
        date: DateTime<Utc>,
        patch_info_hex: Option<&str>,
    ) -> Result<Self> {
        if bytes.len() != IMAGE_LEN {
            return Err(Error::InvalidLength {
                expected: IMAGE_LEN,
                actual: bytes.len(),
            });
        }

        let body = &bytes[BODY_RANGE];
        let variant = patch_info_hex.map_or(SensorVariant::Unknown, SensorVariant::from_patch_info_hex);
        // only whole-minute precision is known for a reading
        let date = date
            .with_second(0)
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(date);

        Ok(Self {
            uid,
            serial_number: serial::serial_number(&uid, variant),
            patch_info: patch_info_hex.map(str::to_owned),
            bytes: bytes.to_vec(),
            date,
            minutes_since_start: u16::from_le_bytes([
                body[MINUTES_OFFSET],
                body[MINUTES_OFFSET + 1],
            ]),
            next_trend_block: body[NEXT_TREND_OFFSET],
            next_history_block: body[NEXT_HISTORY_OFFSET],
            header_crc_valid: checksum::is_valid(&bytes[HEADER_RANGE]),
            body_crc_valid: checksum::is_valid(body),
            footer_crc_valid: checksum::is_valid(&bytes[FOOTER_RANGE]),
        })
    }

    /// UID the image was read from
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// UID as compact uppercase hex
    pub fn patch_uid(&self) -> String {
        bytes_to_hex_upper(self.uid.as_bytes())
    }

    /// Printed serial number
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Rendered patch info, when known
    pub fn patch_info(&self) -> Option<&str> {
        self.patch_info.as_deref()
    }

    /// Whole 344 byte image
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Header section
    pub fn header(&self) -> &[u8] {
        &self.bytes[HEADER_RANGE]
    }

    /// Body section
    pub fn body(&self) -> &[u8] {
        &self.bytes[BODY_RANGE]
    }

    /// Footer section
    pub fn footer(&self) -> &[u8] {
        &self.bytes[FOOTER_RANGE]
    }

    /// Time the image was read
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Minute counter at body offset 292
    pub fn minutes_since_start(&self) -> u16 {
        self.minutes_since_start
    }

    /// Slot the next trend record goes to
    pub fn next_trend_block(&self) -> u8 {
        self.next_trend_block
    }

    /// Slot the next history record goes to
    pub fn next_history_block(&self) -> u8 {
        self.next_history_block
    }

    /// Header checksum check
    pub fn has_valid_header_crc(&self) -> bool {
        self.header_crc_valid
    }

    /// Body checksum check
    pub fn has_valid_body_crc(&self) -> bool {
        self.body_crc_valid
    }

    /// Footer checksum check
    pub fn has_valid_footer_crc(&self) -> bool {
        self.footer_crc_valid
    }

    /// True if all three sections carry a valid checksum
    pub fn has_valid_crcs(&self) -> bool {
        self.header_crc_valid && self.body_crc_valid && self.footer_crc_valid
    }

    /// Checksum computed over the footer payload
    pub fn footer_crc(&self) -> u16 {
        checksum::checksum(&self.footer()[2..])
    }

    /// Sensor state from header byte 4
    pub fn state(&self) -> SensorState {
        SensorState::from_byte(self.header()[STATE_OFFSET])
    }

    /// Region from footer byte 3
    pub fn region(&self) -> SensorRegion {
        SensorRegion::from_code(self.footer()[FOOTER_REGION_OFFSET])
    }

    /// Sensor lifetime in minutes as stored in the footer
    pub fn max_life_minutes(&self) -> u16 {
        let footer = self.footer();
        u16::from_le_bytes([footer[FOOTER_MAX_LIFE_OFFSET], footer[FOOTER_MAX_LIFE_OFFSET + 1]])
    }

    /// Raw trend ring, 16 records in slot order
    pub fn trend(&self) -> &[u8] {
        &self.body()[TREND_OFFSET..TREND_OFFSET + TREND_RECORDS * RECORD_LEN]
    }

    /// Raw history ring, 32 records in slot order
    pub fn history(&self) -> &[u8] {
        &self.body()[HISTORY_OFFSET..HISTORY_OFFSET + HISTORY_RECORDS * RECORD_LEN]
    }

    /// Trend glucose values, oldest first
    pub fn glucose_trend(&self) -> Vec<u16> {
        decode_ring(self.trend(), usize::from(self.next_trend_block))
    }

    /// History glucose values, oldest first
    pub fn glucose_history(&self) -> Vec<u16> {
        decode_ring(self.history(), usize::from(self.next_history_block))
    }

    /// Read date minus the minute counter
    pub fn sensor_start(&self) -> DateTime<Utc> {
        self.date - TimeDelta::minutes(i64::from(self.minutes_since_start))
    }

    /// Age rendered as days, hours and minutes
    pub fn human_readable_age(&self) -> String {
        format!("{:.1} day(s)", f64::from(self.minutes_since_start) / 1440.0)
    }

    /// Date and minute counter of the most recent history value.
    ///
    /// The history index is sometimes advanced before the minute counter;
    /// when the index predicted from the counter disagrees with the stored
    /// one, the value is a full interval newer.
    pub fn date_of_most_recent_history_value(&self) -> (DateTime<Utc>, i64) {
        let minutes = i64::from(self.minutes_since_start);
        let predicted = ((minutes - HISTORY_DELAY_MINUTES) / HISTORY_INTERVAL_MINUTES)
            % HISTORY_RECORDS as i64;
        let delay = (minutes - HISTORY_DELAY_MINUTES) % HISTORY_INTERVAL_MINUTES
            + HISTORY_DELAY_MINUTES;
        let offset = if predicted == i64::from(self.next_history_block) {
            delay
        } else {
            delay - HISTORY_INTERVAL_MINUTES
        };
        (self.date - TimeDelta::minutes(offset), minutes - delay)
    }

    /// Image with all three section checksums restamped.
    pub fn bytes_with_correct_crc(&self) -> Vec<u8> {
        let mut out = self.bytes.clone();
        checksum::stamp_checksum(&mut out[HEADER_RANGE]);
        checksum::stamp_checksum(&mut out[BODY_RANGE]);
        checksum::stamp_checksum(&mut out[FOOTER_RANGE]);
        out
    }
}
