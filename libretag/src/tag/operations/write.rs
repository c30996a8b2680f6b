use log::{debug, info};

use crate::constants::{FOOTER_WINDOW_BLOCKS, FOOTER_WINDOW_START};
use crate::sensor::{FooterWindow, SensorVariant};
use crate::tag::Tag;
use crate::tag::operations::{lock, patch_info, read_window, unlock};
use crate::transport::Transceiver;
use crate::types::Block;
use crate::{Error, Result};

/// Write `data` to block `number`.
pub fn write_block<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    number: u8,
    data: &Block,
) -> Result<()> {
    debug!("write block {:#04x}: {}", number, data.to_hex());
    transceiver.write_block(tag.handle(), number, data)
}

/// Reset sequence for writable variants. Each step runs only if the
/// previous one succeeded.
///
/// The patch-info read between the two command table writes is not used;
/// it makes the tag pick up the modified table.
pub fn reinitialize<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    variant: SensorVariant,
    code: u32,
    password: &[u8],
) -> Result<()> {
    let patch = variant.patch_blocks()?;
    let command_block = variant.command_block_number();
    let crc_block = variant.crc_block_number();
    info!("reinitializing {} sensor {}", variant, tag.uid().to_hex());

    unlock(tag, transceiver, code, password)?;
    write_block(tag, transceiver, command_block, &patch.command_modified)?;
    write_block(tag, transceiver, crc_block, &patch.crc_modified)?;
    patch_info(tag, transceiver)?;
    write_block(tag, transceiver, command_block, &patch.command_original)?;
    write_block(tag, transceiver, crc_block, &patch.crc_original)?;
    lock(tag, transceiver, password)
}

/// Recovery after an interrupted reset: the tag is left unlocked with the
/// modified command table, so only the originals are written back.
pub fn restore<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    variant: SensorVariant,
    password: &[u8],
) -> Result<()> {
    let patch = variant.patch_blocks()?;
    info!("restoring command table of {} sensor {}", variant, tag.uid().to_hex());

    write_block(tag, transceiver, variant.command_block_number(), &patch.command_original)?;
    write_block(tag, transceiver, variant.crc_block_number(), &patch.crc_original)?;
    lock(tag, transceiver, password)
}

/// Read the footer window, apply `edit`, restamp its checksum and write the
/// first block back between unlock and lock.
///
/// A failed window read aborts before anything is written.
pub fn edit_footer<T, F>(
    tag: &Tag,
    transceiver: &mut T,
    variant: SensorVariant,
    code: u32,
    password: &[u8],
    edit: F,
) -> Result<FooterWindow>
where
    T: Transceiver + ?Sized,
    F: FnOnce(&mut FooterWindow),
{
    if !variant.is_writable() {
        return Err(Error::UnsupportedSensorType);
    }
    let blocks = read_window(tag, transceiver, FOOTER_WINDOW_START, FOOTER_WINDOW_BLOCKS)?;
    let mut window = FooterWindow::from_blocks(&blocks)?;
    edit(&mut window);
    let window = window.with_correct_checksum();

    unlock(tag, transceiver, code, password)?;
    write_block(tag, transceiver, FOOTER_WINDOW_START, &window.first_block())?;
    lock(tag, transceiver, password)?;
    Ok(window)
}
