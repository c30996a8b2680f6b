// libretag/src/sensor/mod.rs

/// Per-variant tables
pub mod config;
/// Footer window edits
pub mod footer;
/// Memory image decoder
pub mod reading;
/// Printed serial number
pub mod serial;
mod variant;

pub use footer::FooterWindow;
pub use reading::SensorReading;
pub use serial::serial_number;
pub use variant::SensorVariant;
