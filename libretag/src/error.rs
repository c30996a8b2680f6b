// libretag/src/error.rs

use thiserror::Error;

/// Common error type for tag protocol, decryption and decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// Variant is not writable, or not recognized for the requested action.
    #[error("Unsupported Sensor Type")]
    UnsupportedSensorType,

    /// A credential-requiring action ran without a stored code and password.
    #[error("Missing Unlock Parameters")]
    MissingUnlockParameters,

    /// The tag answered the patch-info command with no data.
    #[error("tag damaged: patch info is empty")]
    TagDamaged,

    /// Input slice or memory image has the wrong size.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length received
        actual: usize,
    },

    /// An action was submitted while another one is in flight.
    #[error("session busy: another action is in flight")]
    SessionBusy,

    /// Opaque failure reported by the host NFC transceiver.
    #[error("transport error: {0}")]
    Transport(String),

    /// Request the crate cannot carry out, with a description.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The dispatcher worker thread is gone.
    #[error("dispatcher worker stopped")]
    WorkerStopped,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
