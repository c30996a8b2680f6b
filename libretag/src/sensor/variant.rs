// libretag/src/sensor/variant.rs

use derive_more::Display;

use super::config::{self, PatchBlocks};
use crate::constants::{COMMAND_BLOCK, CRC_BLOCK, IMAGE_BLOCKS};
use crate::types::{Block, PatchInfo};
use crate::{Error, Result};

/// Sensor variant, identified by the first three bytes of patch info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorVariant {
    /// Libre 1, old firmware
    #[display(fmt = "Libre 1 old")]
    Libre1,
    /// Libre 1, new firmware
    #[display(fmt = "Libre 1 new")]
    Libre1New,
    /// Libre Pro / Libre H
    #[display(fmt = "Libre Pro/H")]
    LibreProH,
    /// US 14 day sensor, encrypted
    #[display(fmt = "Libre US 14day")]
    LibreUS14Day,
    /// Libre 2, encrypted
    #[display(fmt = "Libre 2")]
    Libre2,
    /// Unrecognized patch info
    #[display(fmt = "unknown")]
    Unknown,
}

impl SensorVariant {
    /// Resolve from rendered patch info ("9D 08 30 01 ...").
    ///
    /// Only an exact match of the first eight characters counts.
    pub fn from_patch_info_hex(patch_info_hex: &str) -> Self {
        let Some(prefix) = patch_info_hex.get(..config::PREFIX_HEX_LEN) else {
            return Self::Unknown;
        };
        config::VARIANT_PREFIXES
            .iter()
            .find(|(known, _)| *known == prefix)
            .map_or(Self::Unknown, |(_, variant)| *variant)
    }

    /// Resolve from raw patch info bytes.
    pub fn from_patch_info(info: &PatchInfo) -> Self {
        Self::from_patch_info_hex(&info.to_hex())
    }

    /// Only the Libre 1 family accepts protected writes.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Libre1 | Self::Libre1New)
    }

    /// FRAM of these variants is encrypted and must go through the cipher.
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::Libre2 | Self::LibreUS14Day)
    }

    /// Family digit prepended to the serial number.
    pub fn serial_prefix(self) -> char {
        match self {
            Self::LibreProH => '1',
            Self::Libre2 | Self::LibreUS14Day => '3',
            Self::Libre1 | Self::Libre1New | Self::Unknown => '0',
        }
    }

    /// Blocks needed before the sensor state byte can be interpreted.
    pub fn state_read_blocks(self) -> u8 {
        if self.is_encrypted() {
            IMAGE_BLOCKS as u8
        } else {
            1
        }
    }

    /// Block holding the command-area checksum
    pub const fn crc_block_number(self) -> u8 {
        CRC_BLOCK
    }

    /// Block holding the command table
    pub const fn command_block_number(self) -> u8 {
        COMMAND_BLOCK
    }

    /// Command/crc blocks for protected writes.
    ///
    /// Non-writable variants have none; callers check [`is_writable`] first.
    ///
    /// [`is_writable`]: SensorVariant::is_writable
    pub fn patch_blocks(self) -> Result<&'static PatchBlocks> {
        match self {
            Self::Libre1 => Ok(&config::LIBRE1_PATCH),
            Self::Libre1New => Ok(&config::LIBRE1_NEW_PATCH),
            _ => Err(Error::UnsupportedSensorType),
        }
    }

    /// Identify a writable variant from the contents of its crc block, in
    /// either the original or the modified state.
    pub fn from_crc_block(block: &Block) -> Option<Self> {
        config::WRITABLE_PATCHES
            .iter()
            .find(|(_, patch)| patch.crc_original == *block || patch.crc_modified == *block)
            .map(|(variant, _)| *variant)
    }
}
