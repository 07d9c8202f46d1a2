// fixtures.rs — commonly used frames, payloads and memory images

use libpn532::protocol::Frame;

pub const NTAG_UID: [u8; 7] = [0x04, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
pub const NTAG_UID_HEX: &str = "04aabbccddeeff";

pub const MIFARE_UID: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

/// GetFirmwareVersion reply of a PN532 v1.6
pub fn firmware_frame() -> Vec<u8> {
    hex::decode("0000ff06fad50332010607e800").unwrap()
}

/// InListPassiveTarget reply (response code onwards) with one NTAG
pub fn ntag_list_data() -> Vec<u8> {
    let mut data = vec![0x4B, 0x01, 0x01, 0x00, 0x44, 0x00, 0x07];
    data.extend_from_slice(&NTAG_UID);
    data
}

/// InListPassiveTarget reply with one MIFARE Classic 1K
pub fn mifare1k_list_data() -> Vec<u8> {
    let mut data = vec![0x4B, 0x01, 0x01, 0x00, 0x04, 0x08, 0x04];
    data.extend_from_slice(&MIFARE_UID);
    data
}

/// NTAG as Tg 1 and MIFARE Classic 1K as Tg 2 in one reply
pub fn two_tag_list_data() -> Vec<u8> {
    let mut data = vec![0x4B, 0x02, 0x01, 0x00, 0x44, 0x00, 0x07];
    data.extend_from_slice(&NTAG_UID);
    data.extend_from_slice(&[0x02, 0x00, 0x04, 0x08, 0x04]);
    data.extend_from_slice(&MIFARE_UID);
    data
}

/// "0 targets"
pub fn empty_list_data() -> Vec<u8> {
    vec![0x4B, 0x00]
}

pub fn ntag_list_frame() -> Vec<u8> {
    Frame::encode_response(&ntag_list_data()).unwrap()
}

/// Response frame with two extra zero bytes in front of the start code
pub fn padded_frame() -> Vec<u8> {
    hex::decode("00000000ff02fed5032800").unwrap()
}

/// Type 2 tag image: one short text record, then a terminator
pub fn text_record_image() -> Vec<u8> {
    hex::decode("0305d101015402fe").unwrap()
}
