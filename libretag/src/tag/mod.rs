// libretag/src/tag/mod.rs

//! A connected sensor tag and the command sequences run against it.

use crate::protocol::Command;
use crate::sensor::{FooterWindow, SensorVariant};
use crate::transport::{TagHandle, Transceiver};
use crate::types::{Block, PatchInfo, SensorRegion, Uid};
use crate::Result;

/// Free functions behind the `Tag` methods
pub mod operations;

/// Connected tag. Every operation takes the transceiver explicitly so a
/// single exchange is in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    handle: TagHandle,
}

impl Tag {
    /// Wrap a handle returned by `Transceiver::connect`.
    pub fn new(handle: TagHandle) -> Self {
        Self { handle }
    }

    /// Handle of the connected tag
    pub fn handle(&self) -> &TagHandle {
        &self.handle
    }

    /// Tag UID
    pub fn uid(&self) -> &Uid {
        self.handle.uid()
    }

    /// Send a custom command and return the raw response
    pub fn run<T: Transceiver + ?Sized>(&self, transceiver: &mut T, cmd: &Command) -> Result<Vec<u8>> {
        operations::run_command(self, transceiver, cmd)
    }

    /// Fetch patch info; an empty answer marks a damaged tag.
    pub fn patch_info<T: Transceiver + ?Sized>(&self, transceiver: &mut T) -> Result<PatchInfo> {
        operations::patch_info(self, transceiver)
    }

    /// Read one block
    pub fn read_block<T: Transceiver + ?Sized>(&self, transceiver: &mut T, number: u8) -> Result<Block> {
        operations::read_block(self, transceiver, number)
    }

    /// Write one block
    pub fn write_block<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        number: u8,
        data: &Block,
    ) -> Result<()> {
        operations::write_block(self, transceiver, number, data)
    }

    /// Read `count` blocks from block 0, substituting zeros for failed blocks.
    pub fn read_fram<T: Transceiver + ?Sized>(&self, transceiver: &mut T, count: u8) -> Vec<u8> {
        operations::read_fram(self, transceiver, count)
    }

    /// Read consecutive blocks, failing on the first unreadable one.
    pub fn read_window<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        first: u8,
        count: u8,
    ) -> Result<Vec<Block>> {
        operations::read_window(self, transceiver, first, count)
    }

    /// Lift write protection with the given code and password.
    pub fn unlock<T: Transceiver + ?Sized>(&self, transceiver: &mut T, code: u32, password: &[u8]) -> Result<()> {
        operations::unlock(self, transceiver, code, password)
    }

    /// Re-enable write protection
    pub fn lock<T: Transceiver + ?Sized>(&self, transceiver: &mut T, password: &[u8]) -> Result<()> {
        operations::lock(self, transceiver, password)
    }

    /// Start the sensor
    pub fn activate<T: Transceiver + ?Sized>(&self, transceiver: &mut T, parameters: &[u8]) -> Result<()> {
        operations::activate(self, transceiver, parameters)
    }

    /// Reset a writable sensor so it can be started again.
    pub fn reinitialize<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        variant: SensorVariant,
        code: u32,
        password: &[u8],
    ) -> Result<()> {
        operations::reinitialize(self, transceiver, variant, code, password)
    }

    /// Put back the original command and crc blocks and lock.
    pub fn restore<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        variant: SensorVariant,
        password: &[u8],
    ) -> Result<()> {
        operations::restore(self, transceiver, variant, password)
    }

    /// Rewrite the footer region and lock again.
    pub fn change_region<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        variant: SensorVariant,
        region: SensorRegion,
        code: u32,
        password: &[u8],
    ) -> Result<FooterWindow> {
        operations::edit_footer(self, transceiver, variant, code, password, |w| w.set_region(region))
    }

    /// Set the footer max life to unlimited and lock again.
    pub fn remove_lifetime_limit<T: Transceiver + ?Sized>(
        &self,
        transceiver: &mut T,
        variant: SensorVariant,
        code: u32,
        password: &[u8],
    ) -> Result<FooterWindow> {
        operations::edit_footer(self, transceiver, variant, code, password, |w| {
            w.remove_lifetime_limit()
        })
    }
}
