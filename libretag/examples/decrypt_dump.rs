//! Decrypt a raw Libre 2 memory image given as hex on the command line.
//!
//! Usage:
//!   cargo run -p libretag --example decrypt_dump -- <uid hex> <patch info hex> <image hex>
//!
//! The uid is expected least significant byte first (as the tag reports it
//! reversed). Without arguments the built-in reference vector is used.

use anyhow::{Context, bail};
use chrono::Utc;
use libretag::protocol::decrypt;
use libretag::test_support::{EXAMPLE_CIPHERTEXT, EXAMPLE_SENSOR_ID, EXAMPLE_SENSOR_INFO};
use libretag::utils::fram_dump;
use libretag::{PatchInfo, SensorReading, SensorVariant, Uid};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (uid, info, image) = match args.as_slice() {
        [] => (
            EXAMPLE_SENSOR_ID.to_vec(),
            EXAMPLE_SENSOR_INFO.to_vec(),
            EXAMPLE_CIPHERTEXT.to_vec(),
        ),
        [uid, info, image] => (
            hex::decode(uid).context("uid is not hex")?,
            hex::decode(info).context("patch info is not hex")?,
            hex::decode(image).context("image is not hex")?,
        ),
        _ => bail!("expected <uid hex> <patch info hex> <image hex>"),
    };

    let uid = Uid::try_from(uid.as_slice())?;
    let info = PatchInfo::new(info);
    let variant = SensorVariant::from_patch_info(&info);
    println!("variant: {}, region: {}", variant, info.region());

    let plain = decrypt(variant, &uid, info.as_bytes(), &image)?;
    print!("{}", fram_dump(&plain));

    let reading = SensorReading::decode(&plain, uid, Utc::now(), Some(&info.to_hex()))?;
    println!("state: {}", reading.state());
    println!("checksums valid: {}", reading.has_valid_crcs());
    println!("age: {}", reading.human_readable_age());
    println!("trend: {:?}", reading.glucose_trend());
    println!("history: {:?}", reading.glucose_history());
    Ok(())
}
