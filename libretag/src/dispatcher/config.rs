use std::fmt;

use crate::constants::FRAM_DUMP_BLOCKS;

/// Unlock code and password of the writable sensors.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Custom command code of the unlock command
    pub unlock_code: u32,
    /// Password sent with unlock, lock and Libre 1 activation
    pub password: Vec<u8>,
}

impl Credentials {
    /// Pair an unlock code with its password.
    pub fn new(unlock_code: u32, password: impl Into<Vec<u8>>) -> Self {
        Self {
            unlock_code,
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("unlock_code", &format_args!("{:#x}", self.unlock_code))
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Dispatcher behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Redirect an empty patch info into a single recovery pass
    pub auto_recover: bool,
    /// Blocks read by a full FRAM dump
    pub fram_blocks: u8,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            auto_recover: true,
            fram_blocks: FRAM_DUMP_BLOCKS,
        }
    }
}
