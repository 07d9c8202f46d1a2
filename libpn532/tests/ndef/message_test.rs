#[path = "../common/mod.rs"]
mod common;

use libpn532::ndef::{records, validate_ndef_message};
use libpn532::{Error, Result};

#[test]
fn text_record_walk() -> anyhow::Result<()> {
    let image = common::fixtures::text_record_image();
    let message = validate_ndef_message(&image)?;
    let recs = records(message).collect::<Result<Vec<_>>>()?;
    assert_eq!(recs.len(), 1);
    assert!(recs[0].is_message_begin() && recs[0].is_message_end());
    assert_eq!(recs[0].record_type, b"T");
    Ok(())
}

#[test]
fn two_records_with_flags_in_place() {
    // MB|SR "U" payload 1 byte, then ME|SR "T" payload 1 byte
    let message = [0x91, 0x01, 0x01, 0x55, 0x04, 0x51, 0x01, 0x01, 0x54, 0x02];
    let mut image = vec![0x03, message.len() as u8];
    image.extend_from_slice(&message);
    image.push(0xFE);

    let found = validate_ndef_message(&image).unwrap();
    assert_eq!(found, &message[..]);
    let types: Vec<_> = records(found).map(|r| r.unwrap().record_type).collect();
    assert_eq!(types, vec![&b"U"[..], &b"T"[..]]);
}

#[test]
fn empty_message_is_invalid() {
    let image = [0x03, 0x00, 0xFE];
    assert!(matches!(
        validate_ndef_message(&image),
        Err(Error::InvalidNdef(_))
    ));
}

#[test]
fn missing_message_begin_is_invalid() {
    // ME|SR only
    let image = [0x03, 0x05, 0x51, 0x01, 0x01, 0x54, 0x02];
    assert!(matches!(
        validate_ndef_message(&image),
        Err(Error::InvalidNdef(_))
    ));
}

#[test]
fn record_running_past_message_is_invalid() {
    // payload length 9 inside a 5-byte message
    let image = [0x03, 0x05, 0xD1, 0x01, 0x09, 0x54, 0x02];
    assert!(validate_ndef_message(&image).is_err());
}
