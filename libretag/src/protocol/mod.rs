// libretag/src/protocol/mod.rs

/// Section CRC16
pub mod checksum;
/// Libre 2 family block cipher
pub mod cipher;
/// Vendor custom commands
pub mod commands;

pub use checksum::{checksum, is_valid, with_correct_checksum};
pub use cipher::{activation_parameters, decrypt};
pub use commands::Command;
