use libpn532::protocol::codec::encode_command_frame;
use libpn532::protocol::{AutoPollType, Command, Frame, RfConfigItem};
use libpn532::{BaudRate, Error, SamMode};

#[test]
fn sam_configuration_normal() {
    let frame = encode_command_frame(&Command::SamConfiguration {
        mode: SamMode::Normal,
        use_irq: false,
    })
    .unwrap();
    assert_eq!(frame, Frame::encode(&[0x14, 0x01, 0x14, 0x00]).unwrap());
}

#[test]
fn in_list_passive_target_type_a() {
    let frame = encode_command_frame(&Command::InListPassiveTarget {
        max_targets: 1,
        baud_rate: BaudRate::TypeA106,
        initiator_data: vec![],
    })
    .unwrap();
    assert_eq!(
        frame,
        vec![0x00, 0x00, 0xFF, 0x04, 0xFC, 0xD4, 0x4A, 0x01, 0x00, 0xE1, 0x00]
    );
}

#[test]
fn frame_length_tracks_parameters() {
    let data = vec![0xA5; 40];
    let cmd = Command::InDataExchange {
        target: 1,
        data: data.clone(),
    };
    let frame = encode_command_frame(&cmd).unwrap();
    // cmd + Tg + data, plus the eight framing bytes
    assert_eq!(frame.len(), 2 + data.len() + 8);
    assert_eq!(Frame::decode_command(&frame).unwrap().0, 0x40);
}

#[test]
fn invalid_commands_never_reach_the_wire() {
    let too_many = Command::InListPassiveTarget {
        max_targets: 3,
        baud_rate: BaudRate::TypeA106,
        initiator_data: vec![],
    };
    assert!(matches!(
        encode_command_frame(&too_many),
        Err(Error::InvalidParameter(_))
    ));

    let oversized = Command::InDataExchange {
        target: 1,
        data: vec![0; 260],
    };
    assert!(encode_command_frame(&oversized).is_err());

    let no_types = Command::InAutoPoll {
        poll_count: 1,
        period: 1,
        types: vec![],
    };
    assert!(encode_command_frame(&no_types).is_err());
}

#[test]
fn auto_poll_and_rf_field() {
    let poll = Command::InAutoPoll {
        poll_count: 0xFF,
        period: 2,
        types: vec![AutoPollType::MIFARE, AutoPollType::FELICA_212],
    };
    assert_eq!(poll.encode(), vec![0x60, 0xFF, 0x02, 0x10, 0x11]);

    let rf = Command::RfConfiguration {
        item: RfConfigItem::RfField {
            auto_rfca: false,
            rf_on: true,
        },
    };
    assert_eq!(rf.encode(), vec![0x32, 0x01, 0x01]);
}
