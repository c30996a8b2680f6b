#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{PASSWORD, UNLOCK_CODE, dispatcher_with_credentials, footer_window_bytes, libre1_tag};
use libretag::prelude::*;
use libretag::sensor::config::{LIBRE1_NEW_PATCH, LIBRE1_PATCH};
use libretag::test_support::{LIBRE1_NEW_PATCH_INFO, example_libre2_tag, mock_tag};
use libretag::transport::MockOp;

const LOCK: u16 = 0xA2;
const GET_PATCH_INFO: u16 = 0xA1;

#[test]
fn reset_runs_unlock_patch_restore_lock() {
    let mut dispatcher = dispatcher_with_credentials(libre1_tag());
    let reading = dispatcher.perform(ActionRequest::Reset).unwrap();
    assert!(reading.is_success(), "{}", reading.log_text());
    assert!(reading.log.iter().any(|l| l == "Sensor restarted successfully"));

    let ops: Vec<MockOp> = dispatcher
        .transceiver()
        .ops
        .iter()
        .skip_while(|op| **op != MockOp::Custom(UNLOCK_CODE as u16, PASSWORD.to_vec()))
        .cloned()
        .collect();
    assert_eq!(
        ops,
        vec![
            MockOp::Custom(UNLOCK_CODE as u16, PASSWORD.to_vec()),
            MockOp::Write(0xEC, LIBRE1_PATCH.command_modified),
            MockOp::Write(0x2B, LIBRE1_PATCH.crc_modified),
            MockOp::Custom(GET_PATCH_INFO, vec![]),
            MockOp::Write(0xEC, LIBRE1_PATCH.command_original),
            MockOp::Write(0x2B, LIBRE1_PATCH.crc_original),
            MockOp::Custom(LOCK, PASSWORD.to_vec()),
            MockOp::Invalidate(None),
        ]
    );
}

#[test]
fn reset_uses_variant_specific_crc_block() {
    let image = vec![0u8; 344];
    let mock = mock_tag([0; 8], &LIBRE1_NEW_PATCH_INFO, &image);
    let mut dispatcher = dispatcher_with_credentials(mock);
    dispatcher.perform(ActionRequest::Reset).unwrap();

    let mock = dispatcher.transceiver();
    assert_eq!(mock.block(0x2B), LIBRE1_NEW_PATCH.crc_original);
    assert_eq!(mock.block(0xEC), LIBRE1_NEW_PATCH.command_original);
    assert!(mock.writes().contains(&(0x2B, LIBRE1_NEW_PATCH.crc_modified)));
}

#[test]
fn write_actions_need_credentials() {
    for request in [
        ActionRequest::Reset,
        ActionRequest::ChangeRegion(SensorRegion::Usa),
        ActionRequest::RemoveLifetimeLimitation,
    ] {
        let mut dispatcher = Dispatcher::new(libre1_tag());
        let reading = dispatcher.perform(request).unwrap();
        assert_eq!(reading.failure.as_deref(), Some("Missing Unlock Parameters"));
        assert!(dispatcher.transceiver().writes().is_empty());
        assert_eq!(
            dispatcher.transceiver().ops.last(),
            Some(&MockOp::Invalidate(Some("Missing Unlock Parameters".into())))
        );
    }
}

#[test]
fn write_actions_reject_read_only_variants() {
    let mut dispatcher = dispatcher_with_credentials(example_libre2_tag());
    for request in [
        ActionRequest::Reset,
        ActionRequest::ChangeRegion(SensorRegion::Asia),
        ActionRequest::RemoveLifetimeLimitation,
    ] {
        let reading = dispatcher.perform(request).unwrap();
        assert_eq!(reading.failure.as_deref(), Some("Unsupported Sensor Type"));
    }
    assert!(dispatcher.transceiver().writes().is_empty());
}

#[test]
fn change_region_writes_first_window_block() {
    let mut dispatcher = dispatcher_with_credentials(libre1_tag());
    let reading = dispatcher
        .perform(ActionRequest::ChangeRegion(SensorRegion::Asia))
        .unwrap();
    assert!(reading.is_success(), "{}", reading.log_text());
    assert!(reading
        .log
        .iter()
        .any(|l| l == "Region changed to 08 - Asia and world wide"));

    let mock = dispatcher.transceiver();
    let writes = mock.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].0, 0x28);
    assert_eq!(hex::encode(writes[0].1.as_bytes()), "afc73008b609ef50");
    // blocks 0x29 and 0x2A are untouched
    assert_eq!(mock.block(0x29).as_bytes()[..], footer_window_bytes()[8..16]);

    let commands = mock.commands();
    let tail: Vec<u16> = commands.iter().rev().take(2).map(|(c, _)| *c).collect();
    assert_eq!(tail, vec![LOCK, UNLOCK_CODE as u16]);
}

#[test]
fn remove_lifetime_limitation_sets_unlimited_life() {
    let mut dispatcher = dispatcher_with_credentials(libre1_tag());
    let reading = dispatcher
        .perform(ActionRequest::RemoveLifetimeLimitation)
        .unwrap();
    assert!(reading.is_success(), "{}", reading.log_text());
    assert_eq!(
        hex::encode(dispatcher.transceiver().block(0x28).as_bytes()),
        "84773001b609ffff"
    );
}

#[test]
fn failed_window_read_aborts_before_unlock() {
    let mut mock = libre1_tag();
    mock.fail_read(0x2A);
    let mut dispatcher = dispatcher_with_credentials(mock);
    let reading = dispatcher
        .perform(ActionRequest::ChangeRegion(SensorRegion::Usa))
        .unwrap();

    assert_eq!(reading.state, SessionState::Failed);
    let mock = dispatcher.transceiver();
    assert!(mock.writes().is_empty());
    assert_eq!(mock.command_count(UNLOCK_CODE as u16), 0);
}

#[test]
fn activate_libre1_sends_password() {
    let mut dispatcher = dispatcher_with_credentials(libre1_tag());
    let reading = dispatcher.perform(ActionRequest::Activate).unwrap();
    assert!(reading.log.iter().any(|l| l == "Sensor activated successfully"));
    assert_eq!(
        dispatcher.transceiver().commands().last(),
        Some(&(0xA0, PASSWORD.to_vec()))
    );
}

#[test]
fn activate_unknown_variant_fails() {
    let mock = mock_tag([0; 8], &[0x01, 0x02, 0x03, 0x04], &[0u8; 344]);
    let mut dispatcher = dispatcher_with_credentials(mock);
    let reading = dispatcher.perform(ActionRequest::Activate).unwrap();
    assert_eq!(reading.failure.as_deref(), Some("Unsupported Sensor Type"));
    assert_eq!(dispatcher.transceiver().command_count(0xA0), 0);
}

#[test]
fn write_block_passthrough() {
    let mut dispatcher = Dispatcher::new(libre1_tag());
    let block = Block::from_bytes([0x5A; 8]);
    let reading = dispatcher.perform(ActionRequest::WriteBlock(0x30, block)).unwrap();
    assert!(reading.is_success());
    assert_eq!(dispatcher.transceiver().block(0x30), block);
}
