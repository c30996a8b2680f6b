// libretag/src/transport/traits.rs

use crate::Result;
use crate::types::{Block, Uid};

/// Connected tag as handed out by the transceiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHandle {
    uid: Uid,
}

impl TagHandle {
    /// Handle for the tag with `uid`.
    pub fn new(uid: Uid) -> Self {
        Self { uid }
    }

    /// UID of the connected tag
    pub fn uid(&self) -> &Uid {
        &self.uid
    }
}

/// Transceiver trait abstracts the host NFC stack away from protocol logic.
///
/// Every call is one ISO 15693 exchange and may fail independently; the
/// dispatcher never issues two calls concurrently. Implementations map their
/// own failures to [`crate::Error::Transport`].
pub trait Transceiver {
    /// Wait for a tag and connect to it
    fn connect(&mut self) -> Result<TagHandle>;

    /// Read a single 8 byte block
    fn read_block(&mut self, tag: &TagHandle, block: u8) -> Result<Block>;

    /// Write a single 8 byte block
    fn write_block(&mut self, tag: &TagHandle, block: u8, data: &Block) -> Result<()>;

    /// Send a vendor custom command and return the response payload
    fn custom_command(&mut self, tag: &TagHandle, code: u16, params: &[u8]) -> Result<Vec<u8>>;

    /// End the session, optionally reporting an error message to the user
    fn invalidate(&mut self, tag: &TagHandle, message: Option<&str>);
}

impl<T: Transceiver + ?Sized> Transceiver for Box<T> {
    fn connect(&mut self) -> Result<TagHandle> {
        (**self).connect()
    }

    fn read_block(&mut self, tag: &TagHandle, block: u8) -> Result<Block> {
        (**self).read_block(tag, block)
    }

    fn write_block(&mut self, tag: &TagHandle, block: u8, data: &Block) -> Result<()> {
        (**self).write_block(tag, block, data)
    }

    fn custom_command(&mut self, tag: &TagHandle, code: u16, params: &[u8]) -> Result<Vec<u8>> {
        (**self).custom_command(tag, code, params)
    }

    fn invalidate(&mut self, tag: &TagHandle, message: Option<&str>) {
        (**self).invalidate(tag, message)
    }
}
