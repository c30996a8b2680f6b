// libretag/src/lib.rs

//! libretag
//!
//! Pure Rust protocol engine for Libre glucose-sensor NFC tags: sensor
//! variant detection, the FRAM block cipher, section checksums, memory image
//! decoding and the unlock/write/lock action sequences.
//!
//! Tag I/O goes through the [`transport::Transceiver`] trait so the host NFC
//! stack stays outside this crate.
#![warn(missing_docs)]

/// Memory layout and command constants
pub mod constants;
/// Action dispatcher and session state machine
pub mod dispatcher;
/// Error type
pub mod error;
/// Commonly used items
pub mod prelude;
/// Checksum, cipher and custom command set
pub mod protocol;
/// Sensor variants, memory image decoding and footer edits
pub mod sensor;
/// Operations on a connected tag
pub mod tag;
/// Reference vectors and mock helpers for tests
pub mod test_support;
/// Transceiver abstraction and its mock
pub mod transport;
/// Core newtypes and enums
pub mod types;
/// Hex rendering helpers
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
