use log::{debug, warn};

use crate::constants::BLOCK_SIZE;
use crate::tag::Tag;
use crate::transport::Transceiver;
use crate::types::Block;
use crate::Result;

/// Read block `number` from the tag.
pub fn read_block<T: Transceiver + ?Sized>(tag: &Tag, transceiver: &mut T, number: u8) -> Result<Block> {
    let block = transceiver.read_block(tag.handle(), number)?;
    debug!("read block {:#04x}: {}", number, block.to_hex());
    Ok(block)
}

/// Best-effort bulk read of blocks `0..count`.
///
/// A block that fails to read is replaced by eight zero bytes so the result
/// stays block aligned and is always `count * 8` bytes long.
pub fn read_fram<T: Transceiver + ?Sized>(tag: &Tag, transceiver: &mut T, count: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(usize::from(count) * BLOCK_SIZE);
    for number in 0..count {
        match read_block(tag, transceiver, number) {
            Ok(block) => out.extend_from_slice(block.as_bytes()),
            Err(e) => {
                warn!("block {:#04x} unreadable, substituting zeros: {}", number, e);
                out.extend_from_slice(Block::ZERO.as_bytes());
            }
        }
    }
    out
}

/// Read `count` consecutive blocks starting at `first`; any failure aborts.
pub fn read_window<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    first: u8,
    count: u8,
) -> Result<Vec<Block>> {
    (0..count)
        .map(|offset| read_block(tag, transceiver, first.wrapping_add(offset)))
        .collect()
}
