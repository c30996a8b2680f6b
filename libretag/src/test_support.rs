//! Test support helpers intended for use by unit and integration tests.
//!
//! Holds the reference Libre 2 vector (sensor UID, patch info and encrypted
//! memory image) together with MockTransceiver setup shared across the crate
//! and the tests/ directory.
#![allow(dead_code)]

use crate::constants::{BLOCK_SIZE, CMD_GET_PATCH_INFO};
use crate::transport::mock::MockTransceiver;
use crate::types::{Block, Uid};

/// UID of the reference sensor, least significant byte first.
#[doc(hidden)]
pub const EXAMPLE_SENSOR_ID: [u8; 8] = [157, 129, 194, 0, 0, 164, 7, 224];

/// Patch info of the reference sensor (Libre 2, region Europe).
#[doc(hidden)]
pub const EXAMPLE_SENSOR_INFO: [u8; 6] = [157, 8, 48, 1, 115, 23];

/// Encrypted 43 block memory image of the reference sensor.
#[doc(hidden)]
pub const EXAMPLE_CIPHERTEXT: [u8; 344] = [
    0x06, 0x9a, 0xdd, 0x79, 0x8e, 0x9a, 0xf4, 0xba,
    0xa2, 0x55, 0x4f, 0x31, 0xea, 0xe0, 0x47, 0x3a,
    0xbd, 0x79, 0x7b, 0x27, 0x1c, 0xa2, 0x86, 0xf8,
    0x5f, 0x04, 0x1c, 0xcb, 0x1b, 0x52, 0x4c, 0x77,
    0x52, 0x62, 0xbd, 0xb7, 0x93, 0x97, 0x20, 0x0d,
    0x49, 0x9e, 0xd6, 0xa7, 0x8f, 0x02, 0xb6, 0x16,
    0x45, 0xbc, 0x49, 0xdb, 0x07, 0x9f, 0xb3, 0xa9,
    0xed, 0x4f, 0x20, 0xbd, 0x25, 0xd3, 0x20, 0xa6,
    0xbf, 0x96, 0xab, 0x3c, 0x8f, 0x8f, 0x01, 0x69,
    0x59, 0xc5, 0x62, 0xfa, 0x01, 0xc9, 0x15, 0x38,
    0x40, 0xbf, 0x3a, 0x11, 0xc6, 0x6c, 0x48, 0x6a,
    0x90, 0xfd, 0x13, 0x6f, 0xeb, 0xbb, 0xf5, 0xd0,
    0xef, 0x3c, 0x91, 0x01, 0x6b, 0x5e, 0xee, 0xc7,
    0x9d, 0x5d, 0xf3, 0x05, 0x04, 0x9a, 0x19, 0x81,
    0x83, 0x4b, 0x10, 0xf0, 0xd2, 0x76, 0xac, 0x0e,
    0x50, 0x31, 0x21, 0x0b, 0x51, 0x0b, 0xee, 0xdc,
    0x4e, 0x55, 0x52, 0xf5, 0x04, 0x3f, 0x81, 0xfe,
    0xd6, 0xe9, 0xe1, 0x93, 0x3a, 0x99, 0x14, 0xf7,
    0x0a, 0x26, 0x95, 0x23, 0x0e, 0x3b, 0xa8, 0xe0,
    0xa2, 0x8d, 0x09, 0x48, 0xc9, 0x5a, 0x38, 0x83,
    0x96, 0x59, 0x7e, 0x02, 0x60, 0x26, 0x8c, 0x4e,
    0x97, 0xc4, 0x39, 0x37, 0x25, 0x14, 0xf9, 0xc7,
    0xa8, 0x3b, 0x29, 0xd9, 0xf0, 0x43, 0xc7, 0x5d,
    0xa4, 0x79, 0xce, 0x64, 0xd6, 0x7e, 0x28, 0xe7,
    0x44, 0x04, 0x4c, 0xca, 0x83, 0x9a, 0x62, 0x50,
    0xe3, 0xed, 0x90, 0x35, 0x7d, 0x85, 0x0e, 0xae,
    0xc4, 0x5a, 0x4e, 0xee, 0xa3, 0xc7, 0xf9, 0x4a,
    0x4b, 0x38, 0x7f, 0x3d, 0x62, 0xb4, 0x99, 0x33,
    0x55, 0x44, 0xea, 0xcc, 0x75, 0x9e, 0xf5, 0xb9,
    0x28, 0xba, 0xe3, 0x32, 0x69, 0xe7, 0x9b, 0xa0,
    0x42, 0xb2, 0x7c, 0xa2, 0x46, 0x77, 0x66, 0xa1,
    0xea, 0x69, 0xfc, 0xc8, 0xc3, 0xca, 0xf6, 0x12,
    0x47, 0xbd, 0x96, 0x7b, 0x69, 0x6a, 0x69, 0xdf,
    0x74, 0xa0, 0x8e, 0x65, 0x1c, 0x97, 0x2a, 0xcc,
    0x31, 0x2c, 0x6f, 0xf5, 0xa1, 0x42, 0xb2, 0x1a,
    0x63, 0x6e, 0x88, 0x8c, 0x87, 0xa7, 0xab, 0xa0,
    0xdd, 0x73, 0x09, 0xe6, 0x69, 0x42, 0x14, 0xc3,
    0xac, 0xce, 0xd7, 0xe2, 0x6b, 0xfa, 0xe0, 0xf1,
    0x06, 0xdb, 0x8b, 0xfb, 0xbd, 0x6a, 0xa1, 0x7c,
    0x62, 0x4e, 0xba, 0xec, 0xc8, 0x37, 0x15, 0x44,
    0xab, 0x39, 0x08, 0x1b, 0xdd, 0x76, 0xce, 0x5e,
    0xe2, 0x9b, 0x52, 0x8f, 0x2c, 0xba, 0xad, 0x56,
    0xf8, 0xde, 0x9e, 0x61, 0xf1, 0x9c, 0xfd, 0xfe,
];

/// Patch info prefixes of the known variants followed by a Europe region byte.
#[doc(hidden)]
pub const LIBRE1_PATCH_INFO: [u8; 6] = [0xDF, 0x00, 0x00, 0x01, 0x00, 0x00];
/// Patch info of a new Libre 1
#[doc(hidden)]
pub const LIBRE1_NEW_PATCH_INFO: [u8; 6] = [0xA2, 0x08, 0x00, 0x01, 0x00, 0x00];
/// Patch info of a Libre Pro/H
#[doc(hidden)]
pub const LIBRE_PRO_PATCH_INFO: [u8; 6] = [0x70, 0x00, 0x10, 0x01, 0x00, 0x00];

/// Build a MockTransceiver whose tag carries `uid`, answers the patch-info
/// command with `patch_info` and holds `image` starting at block 0.
#[doc(hidden)]
pub fn mock_tag(uid: [u8; 8], patch_info: &[u8], image: &[u8]) -> MockTransceiver {
    let mut mock = MockTransceiver::new(Uid::from_bytes(uid));
    mock.set_default_response(CMD_GET_PATCH_INFO, patch_info.to_vec());
    load_image(&mut mock, 0, image);
    mock
}

/// Copy `image` into the mock's memory, block by block, from `first_block`.
/// A trailing partial block is ignored.
#[doc(hidden)]
pub fn load_image(mock: &mut MockTransceiver, first_block: u8, image: &[u8]) {
    for (offset, chunk) in image.chunks_exact(BLOCK_SIZE).enumerate() {
        let Some(number) = usize::from(first_block)
            .checked_add(offset)
            .and_then(|n| u8::try_from(n).ok())
        else {
            break;
        };
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(chunk);
        mock.set_block(number, Block::from_bytes(bytes));
    }
}

/// Mock tag preloaded with the encrypted reference Libre 2 image.
#[doc(hidden)]
pub fn example_libre2_tag() -> MockTransceiver {
    mock_tag(EXAMPLE_SENSOR_ID, &EXAMPLE_SENSOR_INFO, &EXAMPLE_CIPHERTEXT)
}
