use log::debug;

use crate::protocol::Command;
use crate::tag::Tag;
use crate::transport::Transceiver;
use crate::types::PatchInfo;
use crate::Result;

/// Send `cmd` as a custom command and return the response payload.
pub fn run_command<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    cmd: &Command,
) -> Result<Vec<u8>> {
    let code = cmd.command_code()?;
    debug!("custom command {} ({:#04x})", cmd.name(), code);
    let resp = transceiver.custom_command(tag.handle(), code, cmd.parameters())?;
    debug!("custom command {} returned {} bytes", cmd.name(), resp.len());
    Ok(resp)
}

/// Send GetPatchInfo and wrap the answer.
pub fn patch_info<T: Transceiver + ?Sized>(tag: &Tag, transceiver: &mut T) -> Result<PatchInfo> {
    run_command(tag, transceiver, &Command::GetPatchInfo).map(PatchInfo::new)
}

/// Send the caller-supplied unlock command.
pub fn unlock<T: Transceiver + ?Sized>(
    tag: &Tag,
    transceiver: &mut T,
    code: u32,
    password: &[u8],
) -> Result<()> {
    let cmd = Command::Unlock {
        code,
        password: password.to_vec(),
    };
    run_command(tag, transceiver, &cmd).map(drop)
}

/// Send Lock with `password`.
pub fn lock<T: Transceiver + ?Sized>(tag: &Tag, transceiver: &mut T, password: &[u8]) -> Result<()> {
    let cmd = Command::Lock {
        password: password.to_vec(),
    };
    run_command(tag, transceiver, &cmd).map(drop)
}

/// Send Activate with `parameters`.
pub fn activate<T: Transceiver + ?Sized>(tag: &Tag, transceiver: &mut T, parameters: &[u8]) -> Result<()> {
    let cmd = Command::Activate {
        parameters: parameters.to_vec(),
    };
    run_command(tag, transceiver, &cmd).map(drop)
}
