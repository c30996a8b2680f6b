//! Per-variant protocol constants

use super::SensorVariant;
use crate::types::Block;

/// Patch-info prefixes (first three bytes, uppercase hex, space separated)
pub const VARIANT_PREFIXES: [(&str, SensorVariant); 5] = [
    ("DF 00 00", SensorVariant::Libre1),
    ("A2 08 00", SensorVariant::Libre1New),
    ("E5 00 03", SensorVariant::LibreUS14Day),
    ("9D 08 30", SensorVariant::Libre2),
    ("70 00 10", SensorVariant::LibreProH),
];

/// Length of the rendered prefix: three bytes, two separators
pub const PREFIX_HEX_LEN: usize = 8;

/// Blocks written while the command table is temporarily patched.
///
/// The modified command block re-enables the reset path; the crc block must
/// match whichever command block is in place or the tag stops answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchBlocks {
    /// Command block as shipped
    pub command_original: Block,
    /// Command block allowing a reset
    pub command_modified: Block,
    /// Crc block matching `command_original`
    pub crc_original: Block,
    /// Crc block matching `command_modified`
    pub crc_modified: Block,
}

const COMMAND_ORIGINAL: Block =
    Block::from_bytes([0xA3, 0x00, 0x56, 0x5A, 0xA2, 0x00, 0xBA, 0xF9]);
const COMMAND_MODIFIED: Block =
    Block::from_bytes([0xA3, 0x00, 0x56, 0x5A, 0xA2, 0x00, 0xAE, 0xFB]);

/// Patch blocks of the old Libre 1
pub static LIBRE1_PATCH: PatchBlocks = PatchBlocks {
    command_original: COMMAND_ORIGINAL,
    command_modified: COMMAND_MODIFIED,
    crc_original: Block::from_bytes([0x9E, 0x42, 0x21, 0x83, 0xF2, 0x90, 0x07, 0x00]),
    crc_modified: Block::from_bytes([0x01, 0x6E, 0x21, 0x83, 0xF2, 0x90, 0x07, 0x00]),
};

/// Patch blocks of the new Libre 1
pub static LIBRE1_NEW_PATCH: PatchBlocks = PatchBlocks {
    command_original: COMMAND_ORIGINAL,
    command_modified: COMMAND_MODIFIED,
    crc_original: Block::from_bytes([0xAE, 0xF9, 0x21, 0x83, 0xF2, 0x90, 0x07, 0x00]),
    crc_modified: Block::from_bytes([0x31, 0xD5, 0x21, 0x83, 0xF2, 0x90, 0x07, 0x00]),
};

/// Writable variants and their patch blocks
pub static WRITABLE_PATCHES: [(SensorVariant, &PatchBlocks); 2] = [
    (SensorVariant::Libre1, &LIBRE1_PATCH),
    (SensorVariant::Libre1New, &LIBRE1_NEW_PATCH),
];
