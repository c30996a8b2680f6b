#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{footer_window_bytes, libre2_plaintext};
use libretag::protocol::checksum::{checksum, is_valid, stamp_checksum, with_correct_checksum};

#[test]
fn reference_sections_are_valid() {
    let image = libre2_plaintext();
    assert!(is_valid(&image[0..24]));
    assert!(is_valid(&image[24..320]));
    assert!(is_valid(&image[320..344]));
    assert_eq!(checksum(&image[322..344]), 0x7F8E);
}

#[test]
fn mutation_after_stamping_invalidates() {
    let mut footer = footer_window_bytes();
    footer[3] = 0x02;
    assert!(!is_valid(&footer));

    stamp_checksum(&mut footer);
    assert!(is_valid(&footer));

    for i in 2..footer.len() {
        let mut mutated = footer.clone();
        mutated[i] ^= 0x01;
        assert!(!is_valid(&mutated), "byte {} flip not detected", i);
    }
}

#[test]
fn recomputing_keeps_payload() {
    let body = &libre2_plaintext()[24..320];
    let mut broken = body.to_vec();
    broken[0] = 0;
    broken[1] = 0;
    assert_eq!(with_correct_checksum(&broken), body.to_vec());
}
