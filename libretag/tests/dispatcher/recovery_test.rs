#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{PASSWORD, dispatcher_with_credentials, libre1_tag};
use common::init_logger;
use libretag::prelude::*;
use libretag::sensor::config::{LIBRE1_NEW_PATCH, LIBRE1_PATCH};
use libretag::test_support::{LIBRE_PRO_PATCH_INFO, LIBRE1_PATCH_INFO};
use libretag::transport::MockOp;

const GET_PATCH_INFO: u16 = 0xA1;
const LOCK: u16 = 0xA2;

#[test]
fn two_empty_patch_infos_do_not_loop() {
    init_logger();
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, vec![]);
    mock.set_block(0x2B, LIBRE1_PATCH.crc_modified);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::ReadHistory).unwrap();

    assert!(reading.is_success(), "{}", reading.log_text());
    assert!(reading.sensor_reading.is_none());
    assert!(reading.log.iter().any(|l| l == "Tag damaged, trying to recover"));
    assert!(reading.log.iter().any(|l| l == "Sensor recovered as Libre 1 old"));

    let mock = dispatcher.transceiver();
    assert_eq!(mock.command_count(GET_PATCH_INFO), 2);
    assert_eq!(
        mock.writes(),
        vec![
            (0xEC, LIBRE1_PATCH.command_original),
            (0x2B, LIBRE1_PATCH.crc_original),
        ]
    );
    assert_eq!(mock.commands().last(), Some(&(LOCK, PASSWORD.to_vec())));
    assert_eq!(mock.ops.iter().filter(|op| **op == MockOp::Connect).count(), 1);
}

#[test]
fn recovery_with_readable_patch_info_on_second_pass() {
    let mut mock = libre1_tag();
    mock.push_response(GET_PATCH_INFO, vec![]);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::ReadState).unwrap();

    assert!(reading.is_success(), "{}", reading.log_text());
    assert!(reading.log.iter().any(|l| l == "Type: Libre 1 old"));
    // variant came from patch info, the crc block is not consulted
    let mock = dispatcher.transceiver();
    assert!(!mock.ops.contains(&MockOp::Read(0x2B)));
    assert_eq!(mock.writes().len(), 2);
}

#[test]
fn recovery_identifies_libre1_new_from_crc_block() {
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, vec![]);
    mock.set_block(0x2B, LIBRE1_NEW_PATCH.crc_original);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::Recover).unwrap();
    assert!(reading.is_success(), "{}", reading.log_text());
    // an explicit recover request never counts as damage
    assert!(!reading.log.iter().any(|l| l.starts_with("Tag damaged")));
    assert_eq!(dispatcher.transceiver().command_count(GET_PATCH_INFO), 1);
    assert_eq!(
        dispatcher.transceiver().block(0x2B),
        LIBRE1_NEW_PATCH.crc_original
    );
}

#[test]
fn unrecognized_crc_block_fails_recovery() {
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, vec![]);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::ReadState).unwrap();
    assert_eq!(reading.state, SessionState::Failed);
    assert_eq!(reading.failure.as_deref(), Some("Unsupported Sensor Type"));
    assert!(dispatcher.transceiver().writes().is_empty());
}

#[test]
fn recovery_without_credentials_fails() {
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, vec![]);
    mock.set_block(0x2B, LIBRE1_PATCH.crc_modified);
    let mut dispatcher = Dispatcher::new(mock);

    let reading = dispatcher.perform(ActionRequest::ReadState).unwrap();
    assert_eq!(reading.failure.as_deref(), Some("Missing Unlock Parameters"));
}

#[test]
fn recovery_flag_resets_per_request() {
    let mut mock = libre1_tag();
    mock.push_response(GET_PATCH_INFO, vec![]);
    mock.push_response(GET_PATCH_INFO, LIBRE1_PATCH_INFO.to_vec());
    mock.push_response(GET_PATCH_INFO, vec![]);
    let mut dispatcher = dispatcher_with_credentials(mock);

    for _ in 0..2 {
        let reading = dispatcher.perform(ActionRequest::ReadState).unwrap();
        assert!(reading.log.iter().any(|l| l == "Tag damaged, trying to recover"));
        assert!(reading.is_success(), "{}", reading.log_text());
    }
}

#[test]
fn recover_rejects_unknown_patch_info_despite_known_crc_block() {
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, vec![0x01, 0x02, 0x03, 0x04, 0x00, 0x00]);
    mock.set_block(0x2B, LIBRE1_PATCH.crc_modified);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::Recover).unwrap();

    assert_eq!(reading.state, SessionState::Failed);
    assert_eq!(reading.failure.as_deref(), Some("Unsupported Sensor Type"));
    assert!(reading.log.iter().any(|l| l == "Type: unknown"));
    assert!(!reading.log.iter().any(|l| l.starts_with("Type from crc block")));
    let mock = dispatcher.transceiver();
    assert!(mock.writes().is_empty());
    assert!(!mock.ops.contains(&MockOp::Read(0x2B)));
    assert_eq!(mock.command_count(LOCK), 0);
}

#[test]
fn recover_rejects_read_only_variant() {
    let mut mock = libre1_tag();
    mock.set_default_response(GET_PATCH_INFO, LIBRE_PRO_PATCH_INFO.to_vec());
    mock.set_block(0x2B, LIBRE1_NEW_PATCH.crc_modified);
    let mut dispatcher = dispatcher_with_credentials(mock);

    let reading = dispatcher.perform(ActionRequest::Recover).unwrap();

    assert_eq!(reading.failure.as_deref(), Some("Unsupported Sensor Type"));
    assert!(dispatcher.transceiver().writes().is_empty());
}
