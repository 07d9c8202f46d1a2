#[path = "../common/mod.rs"]
mod common;

use libpn532::constants::cmd;
use libpn532::{BaudRate, Error, TagType, TransportErrorKind};

#[test]
fn ntag_is_detected() -> anyhow::Result<()> {
    common::helpers::init_logging();
    let (_mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data())?;

    let tag = dev.detect_tag()?;
    assert_eq!(tag.tag_type(), TagType::Ntag);
    assert_eq!(tag.uid_hex(), common::fixtures::NTAG_UID_HEX);
    assert_eq!(tag.uid(), &common::fixtures::NTAG_UID);
    assert_eq!(tag.atqa(), Some(0x0044));
    assert_eq!(tag.sak(), Some(0x00));
    assert_eq!(tag.to_string(), "NTAG 04aabbccddeeff");
    Ok(())
}

#[test]
fn empty_field_is_no_tag() {
    let (_mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::empty_list_data()).unwrap();
    assert!(matches!(dev.detect_tag(), Err(Error::NoTagDetected)));
}

#[test]
fn two_tags_in_one_poll() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::two_tag_list_data())
            .unwrap();

    let tags = dev.detect_tags(2, BaudRate::TypeA106).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].tag_type(), TagType::Ntag);
    assert_eq!(tags[1].tag_type(), TagType::Mifare1k);
    assert_eq!(tags[1].target_number(), 2);
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 1);
}

#[test]
fn max_tags_out_of_range_is_rejected_before_io() {
    let (mock, mut dev) = common::helpers::mock_device().unwrap();
    assert!(matches!(
        dev.detect_tags(0, BaudRate::TypeA106),
        Err(Error::InvalidParameter(_))
    ));
    assert!(dev.detect_tags(3, BaudRate::TypeA106).is_err());
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 0);
}

#[test]
fn transient_failures_are_retried() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    dev.set_retry_config(common::helpers::fast_retry(3)).unwrap();
    mock.fail_next_receives(
        cmd::IN_LIST_PASSIVE_TARGET,
        2,
        Error::transport(TransportErrorKind::Io, "uart framing error"),
    );

    let tag = dev.detect_tag().unwrap();
    assert_eq!(tag.tag_type(), TagType::Ntag);
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 3);
}

#[test]
fn retries_exhausted_returns_last_error() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    dev.set_retry_config(common::helpers::fast_retry(2)).unwrap();
    mock.fail_next_receives(
        cmd::IN_LIST_PASSIVE_TARGET,
        5,
        Error::transport(TransportErrorKind::Io, "uart framing error"),
    );

    let err = dev.detect_tag().unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            kind: TransportErrorKind::Io,
            ..
        }
    ));
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 2);
}

#[test]
fn probe_tells_ultralight_from_ntag() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    // GET_VERSION answer with product type 0x03
    mock.script_frame(
        cmd::IN_DATA_EXCHANGE,
        &[0x41, 0x00, 0x00, 0x04, 0x03, 0x01, 0x01, 0x00, 0x0B, 0x03],
    )
    .unwrap();

    let tag = dev.detect_tag().unwrap();
    let tag = dev.classify_with_probe(tag);
    assert_eq!(tag.tag_type(), TagType::MifareUltralight);
    assert_eq!(tag.uid_hex(), common::fixtures::NTAG_UID_HEX);
}

#[test]
fn probe_failure_keeps_ntag() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    // target timeout status
    mock.script_frame(cmd::IN_DATA_EXCHANGE, &[0x41, 0x01]).unwrap();

    let tag = dev.detect_tag().unwrap();
    let tag = dev.classify_with_probe(tag);
    assert_eq!(tag.tag_type(), TagType::Ntag);
}

#[test]
fn mifare_is_not_probed() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::mifare1k_list_data())
            .unwrap();
    let tag = dev.detect_tag().unwrap();
    let tag = dev.classify_with_probe(tag);
    assert_eq!(tag.tag_type(), TagType::Mifare1k);
    assert_eq!(mock.call_count(cmd::IN_DATA_EXCHANGE), 0);
}
