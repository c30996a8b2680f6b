// libretag/src/constants.rs
//! Fixed layout and protocol constants of the sensor tag

/// Size of a single FRAM block in bytes
pub const BLOCK_SIZE: usize = 8;

/// Number of blocks covering the header/body/footer memory image
pub const IMAGE_BLOCKS: usize = 43;

/// Memory image length: 24 header + 296 body + 24 footer bytes
pub const IMAGE_LEN: usize = IMAGE_BLOCKS * BLOCK_SIZE;

/// Header section: checksum and sensor state
pub const HEADER_RANGE: std::ops::Range<usize> = 0..24;
/// Body section: trend and history rings plus the minute counter
pub const BODY_RANGE: std::ops::Range<usize> = 24..320;
/// Footer section: region and sensor lifetime
pub const FOOTER_RANGE: std::ops::Range<usize> = 320..344;

/// Block count of a full FRAM dump
pub const FRAM_DUMP_BLOCKS: u8 = 0xFF;

/// First block of the three-block footer window holding region and lifetime
pub const FOOTER_WINDOW_START: u8 = 0x28;
/// Number of blocks in the footer window
pub const FOOTER_WINDOW_BLOCKS: u8 = 3;

/// Offset of the region byte inside the footer window
pub const FOOTER_REGION_OFFSET: usize = 3;
/// Offset of the little-endian max-life word
pub const FOOTER_MAX_LIFE_OFFSET: usize = 6;

/// Block guarding the command area checksum
pub const CRC_BLOCK: u8 = 0x2B;

/// Block holding the command-interpretation table
pub const COMMAND_BLOCK: u8 = 0xEC;

/// Vendor custom command code: start the sensor
pub const CMD_ACTIVATE: u16 = 0xA0;
/// Read patch info
pub const CMD_GET_PATCH_INFO: u16 = 0xA1;
/// Re-enable write protection
pub const CMD_LOCK: u16 = 0xA2;

/// Base address used when rendering FRAM dumps
pub const FRAM_DUMP_BASE_ADDRESS: usize = 0xF860;
