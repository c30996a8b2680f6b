//! Utilities for libretag: small, reusable helpers used across the crate.
//!
//! Hex rendering for session logs and FRAM dumps lives here.

/// Hex rendering
pub mod hex;

pub use hex::*;
