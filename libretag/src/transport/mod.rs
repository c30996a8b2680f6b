// libretag/src/transport/mod.rs

/// In-memory tag for tests
pub mod mock;
/// Transceiver trait
pub mod traits;

pub use mock::{MockOp, MockTransceiver};
pub use traits::{TagHandle, Transceiver};
