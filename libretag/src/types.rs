// libretag/src/types.rs

use crate::Error;
use crate::constants::BLOCK_SIZE;
use derive_more::Display;
use std::convert::TryFrom;

/// Tag UID - Newtype Pattern (8 bytes, least significant byte first).
///
/// The cipher and serial-number derivation index the UID in this order;
/// the two most significant bytes are the `0x07 0xE0` manufacturer prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid([u8; 8]);

impl Uid {
    /// Wrap raw UID bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Uppercase hex, space separated
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// Block - one 8 byte FRAM block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    /// All-zero block
    pub const ZERO: Self = Self([0; BLOCK_SIZE]);

    /// Wrap raw block bytes.
    pub const fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw block bytes
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Uppercase hex, space separated
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Raw answer of the patch-info custom command.
///
/// The first three bytes identify the sensor variant, the fourth the region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchInfo(Vec<u8>);

impl PatchInfo {
    /// Wrap the raw patch-info answer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True for the empty answer of a damaged tag
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase, space separated rendering ("9D 08 30 01 73 17").
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper_spaced(&self.0)
    }

    /// Region code at byte 3
    pub fn region(&self) -> SensorRegion {
        self.0
            .get(3)
            .map_or(SensorRegion::Unknown, |&b| SensorRegion::from_code(b))
    }
}

/// SensorRegion, stored at footer byte 3 and patch-info byte 3
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorRegion {
    /// Europe
    #[display(fmt = "01 - Europe")]
    Europe = 0x01,
    /// United States
    #[display(fmt = "02 - US")]
    Usa = 0x02,
    /// New Zealand
    #[display(fmt = "04 - New Zealand")]
    NewZealand = 0x04,
    /// Asia and world wide
    #[display(fmt = "08 - Asia and world wide")]
    Asia = 0x08,
    /// Any other code
    #[display(fmt = "Unknown")]
    Unknown = 0x00,
}

impl SensorRegion {
    /// Regions that may be written to a tag.
    pub const SELECTABLE: [SensorRegion; 4] = [
        SensorRegion::Europe,
        SensorRegion::Usa,
        SensorRegion::NewZealand,
        SensorRegion::Asia,
    ];

    /// Map a region code; unknown codes give `Unknown`.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x01 => Self::Europe,
            0x02 => Self::Usa,
            0x04 => Self::NewZealand,
            0x08 => Self::Asia,
            _ => Self::Unknown,
        }
    }

    /// Region code
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// SensorState, stored at header byte 4
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorState {
    /// Any unrecognized state byte
    #[display(fmt = "unknown")]
    Unknown = 0,
    /// Not yet started
    #[display(fmt = "new")]
    New = 1,
    /// Warming up
    #[display(fmt = "activating")]
    Activating = 2,
    /// Delivering readings
    #[display(fmt = "operational")]
    Operational = 3,
    /// Past its lifetime, grace period
    #[display(fmt = "expiring")]
    Expiring = 4,
    /// Finished
    #[display(fmt = "expired")]
    Expired = 5,
    /// Failed
    #[display(fmt = "error")]
    Error = 6,
}

impl SensorState {
    /// Map the header state byte.
    pub fn from_byte(b: u8) -> Self {
        match b {
            1 => Self::New,
            2 => Self::Activating,
            3 => Self::Operational,
            4 => Self::Expiring,
            5 => Self::Expired,
            6 => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// State code
    pub fn code(self) -> u8 {
        self as u8
    }
}
