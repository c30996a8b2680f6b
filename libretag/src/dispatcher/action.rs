use derive_more::Display;

use crate::types::{Block, SensorRegion};

/// Action requested by the caller, executed once per tag connection.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRequest {
    /// Read and log the sensor state byte
    #[display(fmt = "read state")]
    ReadState,
    /// Dump FRAM
    #[display(fmt = "read FRAM")]
    ReadFram,
    /// Decode the memory image including glucose history
    #[display(fmt = "read history")]
    ReadHistory,
    /// Reset a writable sensor
    #[display(fmt = "reset")]
    Reset,
    /// Start the sensor
    #[display(fmt = "activate")]
    Activate,
    /// Rewrite the footer region
    #[display(fmt = "change region to {}", _0)]
    ChangeRegion(SensorRegion),
    /// Set the footer max life to unlimited
    #[display(fmt = "remove lifetime limitation")]
    RemoveLifetimeLimitation,
    /// Put back the original command and crc blocks
    #[display(fmt = "recover")]
    Recover,
    /// Send an arbitrary custom command
    #[display(fmt = "custom command {:#04x}", code)]
    Custom {
        /// Command code
        code: u16,
        /// Parameters; `None` sends none
        payload: Option<Vec<u8>>,
    },
    /// Read one block
    #[display(fmt = "read block {:#04x}", _0)]
    ReadBlock(u8),
    /// Write one block without unlocking
    #[display(fmt = "write block {:#04x}", _0)]
    WriteBlock(u8, Block),
}

impl ActionRequest {
    /// Actions that need the stored unlock code and password
    pub fn requires_credentials(&self) -> bool {
        matches!(
            self,
            Self::Reset | Self::ChangeRegion(_) | Self::RemoveLifetimeLimitation | Self::Recover
        )
    }
}
