/// Custom command wrappers
pub mod command;
/// Block reads
pub mod read;
/// Block writes and write sequences
pub mod write;

pub use command::{activate, lock, patch_info, run_command, unlock};
pub use read::{read_block, read_fram, read_window};
pub use write::{edit_footer, reinitialize, restore, write_block};
