// fixtures.rs: reference vectors and mock setup shared by the integration tests

use chrono::{DateTime, TimeZone, Utc};
use libretag::dispatcher::Dispatcher;
use libretag::protocol::checksum;
use libretag::test_support::{LIBRE1_PATCH_INFO, mock_tag};
use libretag::transport::MockTransceiver;

/// Unlock code and password used against writable mock tags
pub const UNLOCK_CODE: u32 = 0xE4;
pub const PASSWORD: [u8; 4] = [0xC2, 0xAD, 0x75, 0x21];

/// Decrypted memory image of the reference Libre 2 sensor
const LIBRE2_PLAINTEXT_HEX: [&str; 11] = [
    "24fad01a030000000000000000000000000000000000000013ba0f0f7b0500b0",
    "5980750500a05980690500945980610500b459805e0500b05980580500bc5980",
    "4c0508f259804d0500c85980480500b01980410508a259803805009859802e05",
    "009859802a0500585980250500745980220500985980880500b85980a60800e8",
    "5980f108005c5a804109003c59807c0900ec5880bb0800dc5980ac08009c5a80",
    "2a0800345a80db0700ec59805a0700105a808f0600485a80a70500585a807f05",
    "00245980fc0400f859809e0500c059807e0500b05980aa0600a05980e4060040",
    "59801707004c59800f07007859809907009c5980f908000c5980b10900405a80",
    "b30800cc5980f00700205a804b0700945a808f0600905980f905009c5a808a05",
    "00445a804705002c5a809a0500085a809506007459807f070054598050280100",
    "8e7f3001b609ef50140396805a00cda60e741a000024996c",
];

pub fn libre2_plaintext() -> Vec<u8> {
    hex::decode(LIBRE2_PLAINTEXT_HEX.concat()).unwrap()
}

/// Footer window (blocks 0x28-0x2A) of the reference image
pub fn footer_window_bytes() -> Vec<u8> {
    hex::decode("8e7f3001b609ef50140396805a00cda60e741a000024996c").unwrap()
}

pub fn reference_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 10, 12, 30, 0).unwrap()
}

/// Plain Libre 1 image with the given state byte and valid checksums
pub fn libre1_image(state: u8) -> Vec<u8> {
    let mut image = libre2_plaintext();
    image[4] = state;
    checksum::stamp_checksum(&mut image[0..24]);
    image
}

/// Libre 1 mock tag holding `libre1_image(0x03)` at block 0
pub fn libre1_tag() -> MockTransceiver {
    mock_tag([0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x07, 0xE0], &LIBRE1_PATCH_INFO, &libre1_image(0x03))
}

pub fn dispatcher_with_credentials(mock: MockTransceiver) -> Dispatcher<MockTransceiver> {
    let mut dispatcher = Dispatcher::new(mock);
    dispatcher.set_credentials(UNLOCK_CODE, PASSWORD.to_vec());
    dispatcher
}
