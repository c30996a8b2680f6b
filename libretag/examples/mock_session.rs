//! Runs every read action against the built-in reference Libre 2 tag and
//! prints the session logs.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libretag --example mock_session

use libretag::prelude::*;
use libretag::test_support::example_libre2_tag;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut dispatcher = DispatcherBuilder::new()
        .with_transceiver(example_libre2_tag())
        .build()?;

    for request in [ActionRequest::ReadState, ActionRequest::ReadHistory, ActionRequest::Activate] {
        println!("== {} ==", request);
        let reading = dispatcher.perform(request)?;
        print!("{}", reading.log_text());

        if let Some(sensor) = &reading.sensor_reading {
            println!("serial: {}", sensor.serial_number());
            println!("started: {}", sensor.sensor_start());
            let (date, _) = sensor.date_of_most_recent_history_value();
            println!("latest history value: {}", date);
        }
    }
    Ok(())
}
