// libretag/src/sensor/footer.rs

//! Three block footer window (blocks 0x28-0x2A) holding region and lifetime.
//!
//! Edits are applied in memory, then the window checksum is restamped. Only
//! the first block is written back to the tag.

use crate::constants::{
    BLOCK_SIZE, FOOTER_MAX_LIFE_OFFSET, FOOTER_REGION_OFFSET, FOOTER_WINDOW_BLOCKS,
};
use crate::protocol::checksum;
use crate::types::{Block, SensorRegion};
use crate::{Error, Result};

/// Footer window size in bytes
pub const FOOTER_WINDOW_LEN: usize = FOOTER_WINDOW_BLOCKS as usize * BLOCK_SIZE;

/// Max-life value that disables the lifetime limit
pub const UNLIMITED_LIFE: u16 = 0xFFFF;

/// The three blocks starting at 0x28 holding region and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterWindow([u8; FOOTER_WINDOW_LEN]);

impl FooterWindow {
    /// Wrap raw window bytes.
    pub fn from_bytes(bytes: [u8; FOOTER_WINDOW_LEN]) -> Self {
        Self(bytes)
    }

    /// Assemble from the three window blocks in tag order.
    pub fn from_blocks(blocks: &[Block]) -> Result<Self> {
        if blocks.len() != usize::from(FOOTER_WINDOW_BLOCKS) {
            return Err(Error::InvalidLength {
                expected: usize::from(FOOTER_WINDOW_BLOCKS),
                actual: blocks.len(),
            });
        }
        let mut bytes = [0u8; FOOTER_WINDOW_LEN];
        for (chunk, block) in bytes.chunks_exact_mut(BLOCK_SIZE).zip(blocks) {
            chunk.copy_from_slice(block.as_bytes());
        }
        Ok(Self(bytes))
    }

    /// Raw window bytes
    pub fn as_bytes(&self) -> &[u8; FOOTER_WINDOW_LEN] {
        &self.0
    }

    /// Region byte
    pub fn region(&self) -> SensorRegion {
        SensorRegion::from_code(self.0[FOOTER_REGION_OFFSET])
    }

    /// Replace the region byte; the checksum is left stale.
    pub fn set_region(&mut self, region: SensorRegion) {
        self.0[FOOTER_REGION_OFFSET] = region.code();
    }

    /// Sensor lifetime in minutes
    pub fn max_life(&self) -> u16 {
        u16::from_le_bytes([
            self.0[FOOTER_MAX_LIFE_OFFSET],
            self.0[FOOTER_MAX_LIFE_OFFSET + 1],
        ])
    }

    /// Set max life to [`UNLIMITED_LIFE`].
    pub fn remove_lifetime_limit(&mut self) {
        let [lo, hi] = UNLIMITED_LIFE.to_le_bytes();
        self.0[FOOTER_MAX_LIFE_OFFSET] = lo;
        self.0[FOOTER_MAX_LIFE_OFFSET + 1] = hi;
    }

    /// True if the stored checksum matches the window
    pub fn has_valid_checksum(&self) -> bool {
        checksum::is_valid(&self.0)
    }

    /// Restamp the checksum.
    pub fn with_correct_checksum(mut self) -> Self {
        checksum::stamp_checksum(&mut self.0);
        self
    }

    /// First block of the window, the only one written back.
    pub fn first_block(&self) -> Block {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(&self.0[..BLOCK_SIZE]);
        Block::from_bytes(bytes)
    }
}
