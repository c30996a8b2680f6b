// libretag/src/prelude.rs

pub use crate::dispatcher::{
    ActionRequest, Credentials, Dispatcher, DispatcherBuilder, DispatcherConfig, Reading,
    SessionState,
};
#[cfg(feature = "async")]
pub use crate::dispatcher::DispatcherWorker;
pub use crate::protocol::Command;
pub use crate::sensor::{FooterWindow, SensorReading, SensorVariant};
pub use crate::tag::Tag;
pub use crate::transport::{TagHandle, Transceiver};
pub use crate::{Block, Error, PatchInfo, Result, SensorRegion, SensorState, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_upper, bytes_to_hex_upper_spaced, fram_dump};
