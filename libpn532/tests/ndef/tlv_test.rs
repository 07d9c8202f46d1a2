#[path = "../common/mod.rs"]
mod common;

use libpn532::Error;
use libpn532::ndef::{extract_ndef_message, find_ndef_tlv, wrap_ndef_tlv};

#[test]
fn simple_ndef_tlv() {
    let data = [0x03, 0x05, 0xD1, 0x01, 0x01, 0x54, 0x02];
    assert_eq!(
        find_ndef_tlv(&data).unwrap(),
        Some(&[0xD1, 0x01, 0x01, 0x54, 0x02][..])
    );
}

#[test]
fn padding_and_other_tlvs_are_skipped() {
    let data = [
        0x00, 0x00, 0x01, 0x02, 0xAA, 0xBB, 0x03, 0x03, 0xD1, 0x01, 0x01, 0xFE,
    ];
    assert_eq!(
        find_ndef_tlv(&data).unwrap(),
        Some(&[0xD1, 0x01, 0x01][..])
    );
}

#[test]
fn truncated_ndef_tlv() {
    let data = [0x03, 0x10, 0x01, 0x02];
    assert!(matches!(
        find_ndef_tlv(&data),
        Err(Error::TruncatedNdef {
            needed: 18,
            available: 4
        })
    ));
}

#[test]
fn long_form_lock_control_is_skipped() {
    let mut data = vec![0x01, 0xFF, 0x00, 0x03, 0x11, 0x22, 0x33];
    data.extend_from_slice(&[0x03, 0x02, 0xAB, 0xCD, 0xFE]);
    assert_eq!(find_ndef_tlv(&data).unwrap(), Some(&[0xAB, 0xCD][..]));
}

#[test]
fn terminator_before_ndef() {
    let data = [0x00, 0xFE, 0x03, 0x02, 0xAB, 0xCD];
    assert_eq!(find_ndef_tlv(&data).unwrap(), None);
    assert!(matches!(extract_ndef_message(&data), Err(Error::NoNdefTlv)));
}

#[test]
fn unknown_tag_is_malformed() {
    let data = [0x00, 0x42, 0x01, 0x00];
    assert!(matches!(
        find_ndef_tlv(&data),
        Err(Error::MalformedTlv {
            offset: 1,
            tag: 0x42
        })
    ));
}

#[test]
fn wrapped_message_is_found_again() {
    let message = vec![0x5A; 300];
    let image = wrap_ndef_tlv(&message).unwrap();
    assert_eq!(&image[..4], &[0x03, 0xFF, 0x01, 0x2C]);
    assert_eq!(image.last(), Some(&0xFE));
    assert_eq!(extract_ndef_message(&image).unwrap(), &message[..]);
}

#[test]
fn fixture_image_has_message() {
    let image = common::fixtures::text_record_image();
    assert_eq!(extract_ndef_message(&image).unwrap().len(), 5);
}
