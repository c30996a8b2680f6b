#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{libre1_tag, libre2_plaintext};
use common::init_logger;
use libretag::prelude::*;
use libretag::test_support::example_libre2_tag;
use libretag::transport::MockOp;

#[test]
fn read_state_of_libre2_decrypts_full_image() {
    init_logger();
    let mut dispatcher = Dispatcher::new(example_libre2_tag());
    let reading = dispatcher.perform(ActionRequest::ReadState).unwrap();

    assert!(reading.is_success(), "{}", reading.log_text());
    assert_eq!(reading.data.len(), 344);
    assert_eq!(
        reading.log,
        vec![
            "Start processing...",
            "Tag connected",
            "UID: 9D 81 C2 00 00 A4 07 E0",
            "Patch Info: 9D 08 30 01 73 17",
            "Type: Libre 2",
            "Region: 01 - Europe",
            "Sensor state: operational (3)",
            "Completed",
        ]
    );
}

#[test]
fn read_history_yields_sensor_reading() {
    init_logger();
    let mut dispatcher = Dispatcher::new(example_libre2_tag());
    let reading = dispatcher.perform(ActionRequest::ReadHistory).unwrap();

    let sensor = reading.sensor_reading.expect("history read decodes a reading");
    assert_eq!(sensor.bytes(), libre2_plaintext().as_slice());
    assert!(reading.log.iter().any(|l| l == "Age: 7.2 day(s)"));
    assert!(reading.log.iter().any(|l| l.starts_with("History: [247, 257")));
    assert!(reading.log.iter().any(|l| l.starts_with("Trend: [199, 196")));
}

#[test]
fn fram_dump_reads_every_block_and_survives_failures() {
    init_logger();
    let mut mock = libre1_tag();
    mock.fail_read(0x10);
    let mut dispatcher = Dispatcher::new(mock);
    let reading = dispatcher.perform(ActionRequest::ReadFram).unwrap();

    assert!(reading.is_success(), "{}", reading.log_text());
    assert_eq!(reading.data.len(), 0xFF * 8);
    assert_eq!(&reading.data[0x80..0x88], &[0u8; 8]);
    assert!(reading.log.iter().any(|l| l == "FRAM dump:"));
    assert!(reading.log.iter().any(|l| l.starts_with("F860 00: ")));
    assert!(reading.log.iter().any(|l| l == "F8E0 10: 00 00 00 00 00 00 00 00"));

    let reads = dispatcher
        .transceiver()
        .ops
        .iter()
        .filter(|op| matches!(op, MockOp::Read(_)))
        .count();
    assert_eq!(reads, 0xFF);
}

#[test]
fn fram_block_count_is_configurable() {
    let config = DispatcherConfig {
        fram_blocks: 4,
        ..Default::default()
    };
    let mut dispatcher = DispatcherBuilder::new()
        .with_transceiver(libre1_tag())
        .config(config)
        .build()
        .unwrap();
    let reading = dispatcher.perform(ActionRequest::ReadFram).unwrap();
    assert_eq!(reading.data.len(), 32);
}

#[test]
fn raw_block_and_custom_passthrough() {
    let mut mock = libre1_tag();
    mock.push_response(0xA3, vec![0xAA, 0xBB]);
    let mut dispatcher = Dispatcher::new(mock);

    let reading = dispatcher.perform(ActionRequest::ReadBlock(0)).unwrap();
    assert_eq!(reading.data.len(), 8);
    assert_eq!(reading.data[4], 0x03);

    let reading = dispatcher
        .perform(ActionRequest::Custom {
            code: 0xA3,
            payload: Some(vec![0x01]),
        })
        .unwrap();
    assert_eq!(reading.data, vec![0xAA, 0xBB]);
    assert!(reading.log.iter().any(|l| l == "Response: AA BB"));
    assert_eq!(
        dispatcher.transceiver().commands().last(),
        Some(&(0xA3, vec![0x01]))
    );
}

#[test]
fn every_request_ends_idle_with_invalidated_session() {
    let mut dispatcher = Dispatcher::new(libre1_tag());
    for request in [ActionRequest::ReadState, ActionRequest::ReadBlock(2)] {
        let reading = dispatcher.perform(request).unwrap();
        assert_eq!(reading.state, SessionState::Completed);
        assert_eq!(dispatcher.state(), SessionState::Idle);
        assert_eq!(dispatcher.transceiver().ops.last(), Some(&MockOp::Invalidate(None)));
    }
}

#[test]
fn boxed_transceiver_works_as_default() {
    let boxed: Box<dyn Transceiver + Send> = Box::new(libre1_tag());
    let mut dispatcher: Dispatcher = Dispatcher::new(boxed);
    assert!(dispatcher.perform(ActionRequest::ReadState).unwrap().is_success());
}
