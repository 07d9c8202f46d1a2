#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::{AutoPollType, Command, Response, TargetInfo, decode_in_auto_poll};
use libpn532::{BaudRate, Error};

fn list_command(max_targets: u8) -> Command {
    Command::InListPassiveTarget {
        max_targets,
        baud_rate: BaudRate::TypeA106,
        initiator_data: vec![],
    }
}

#[test]
fn two_targets_in_one_reply() {
    let data = common::fixtures::two_tag_list_data();
    let resp = Response::decode(&list_command(2), data[0], &data[1..]).unwrap();
    let Response::InListPassiveTarget { targets } = resp else {
        panic!("unexpected response {resp:?}");
    };
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].target_number, 1);
    assert_eq!(targets[1].target_number, 2);
    match &targets[1].info {
        TargetInfo::TypeA { sak, uid, .. } => {
            assert_eq!(*sak, 0x08);
            assert_eq!(uid.as_bytes(), &common::fixtures::MIFARE_UID);
        }
        other => panic!("unexpected info {other:?}"),
    }
}

#[test]
fn response_code_must_follow_command() {
    let err = Response::decode(&Command::GetFirmwareVersion, 0x4B, &[0x00]).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedResponse {
            expected: 0x03,
            actual: 0x4B
        }
    ));
}

#[test]
fn data_exchange_status_is_checked() {
    let cmd = Command::InDataExchange {
        target: 1,
        data: vec![0x30, 0x04],
    };
    let ok = Response::decode(&cmd, 0x41, &[0x00, 0xDE, 0xAD]).unwrap();
    assert_eq!(
        ok,
        Response::InDataExchange {
            data: vec![0xDE, 0xAD]
        }
    );

    // 0x01: timeout on the RF side; upper bits (MI, NAD) are ignored
    let err = Response::decode(&cmd, 0x41, &[0x41]).unwrap_err();
    assert!(matches!(err, Error::ChipError(0x01)));
}

#[test]
fn truncated_target_list_is_an_error() {
    let data = common::fixtures::ntag_list_data();
    let short = &data[1..data.len() - 2];
    assert!(Response::decode(&list_command(1), 0x4B, short).is_err());
}

#[test]
fn auto_poll_reports_type_per_target() {
    let mut data = vec![0x01, 0x10, 0x0C];
    data.extend_from_slice(&[0x01, 0x00, 0x04, 0x08, 0x04]);
    data.extend_from_slice(&common::fixtures::MIFARE_UID);
    data.extend_from_slice(&[0xAA, 0xBB, 0xCC]);
    // TgDataLen says 12 but the descriptor itself is 9 bytes; the rest is skipped
    let targets = decode_in_auto_poll(&data).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].poll_type, AutoPollType::MIFARE);
    assert_eq!(targets[0].target.baud_rate, BaudRate::TypeA106);
}
