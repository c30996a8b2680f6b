// libretag/src/protocol/commands.rs

use crate::constants::{CMD_ACTIVATE, CMD_GET_PATCH_INFO, CMD_LOCK};
use crate::{Error, Result};

/// Vendor custom commands understood by the tag. New commands should be
/// added here together with their code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read the variant/region identification blob
    GetPatchInfo,
    /// Start the sensor; parameters are the password (Libre 1 family) or
    /// the UID-derived activation parameters (Libre 2 family)
    Activate {
        /// Password or activation parameters
        parameters: Vec<u8>,
    },
    /// Re-enable write protection
    Lock {
        /// Tag password
        password: Vec<u8>,
    },
    /// Lift write protection; the code is supplied by the caller
    Unlock {
        /// Command code of the unlock command
        code: u32,
        /// Tag password
        password: Vec<u8>,
    },
    /// Caller-supplied passthrough
    Custom {
        /// Command code
        code: u16,
        /// Request parameters
        payload: Vec<u8>,
    },
}

impl Command {
    /// Return the custom command code sent to the transceiver.
    pub fn command_code(&self) -> Result<u16> {
        match self {
            Self::GetPatchInfo => Ok(CMD_GET_PATCH_INFO),
            Self::Activate { .. } => Ok(CMD_ACTIVATE),
            Self::Lock { .. } => Ok(CMD_LOCK),
            Self::Unlock { code, .. } => u16::try_from(*code).map_err(|_| {
                Error::UnsupportedOperation(format!(
                    "unlock code {:#x} does not fit a custom command code",
                    code
                ))
            }),
            Self::Custom { code, .. } => Ok(*code),
        }
    }

    /// Request parameters following the command code.
    pub fn parameters(&self) -> &[u8] {
        match self {
            Self::GetPatchInfo => &[],
            Self::Activate { parameters } => parameters,
            Self::Lock { password } | Self::Unlock { password, .. } => password,
            Self::Custom { payload, .. } => payload,
        }
    }

    /// Name used in diagnostics; parameters may hold secrets and are not shown.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetPatchInfo => "get patch info",
            Self::Activate { .. } => "activate",
            Self::Lock { .. } => "lock",
            Self::Unlock { .. } => "unlock",
            Self::Custom { .. } => "custom",
        }
    }
}
