use libretag::{PatchInfo, SensorVariant};

#[test]
fn known_prefixes_resolve() {
    let cases = [
        ([0xDF, 0x00, 0x00], SensorVariant::Libre1),
        ([0xA2, 0x08, 0x00], SensorVariant::Libre1New),
        ([0xE5, 0x00, 0x03], SensorVariant::LibreUS14Day),
        ([0x9D, 0x08, 0x30], SensorVariant::Libre2),
        ([0x70, 0x00, 0x10], SensorVariant::LibreProH),
        ([0x9D, 0x08, 0x31], SensorVariant::Unknown),
    ];
    for (prefix, expected) in cases {
        let mut bytes = prefix.to_vec();
        bytes.extend_from_slice(&[0x01, 0x73, 0x17]);
        assert_eq!(SensorVariant::from_patch_info(&PatchInfo::new(bytes)), expected);
    }
}

#[test]
fn trailing_bytes_do_not_matter() {
    let a = PatchInfo::new(vec![0xDF, 0x00, 0x00, 0x01]);
    let b = PatchInfo::new(vec![0xDF, 0x00, 0x00, 0x08, 0xFF, 0xFF]);
    assert_eq!(SensorVariant::from_patch_info(&a), SensorVariant::from_patch_info(&b));
}

#[test]
fn display_names() {
    assert_eq!(SensorVariant::Libre1.to_string(), "Libre 1 old");
    assert_eq!(SensorVariant::LibreUS14Day.to_string(), "Libre US 14day");
    assert_eq!(SensorVariant::Unknown.to_string(), "unknown");
}
