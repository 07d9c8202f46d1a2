// libpn532-rs/libpn532/src/protocol/commands/initiator.rs

use crate::constants::cmd;
use crate::types::BaudRate;

/// Target type byte for InAutoPoll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoPollType(pub u8);

impl AutoPollType {
    pub const GENERIC_106: Self = Self(0x00);
    pub const GENERIC_212: Self = Self(0x01);
    pub const GENERIC_424: Self = Self(0x02);
    pub const ISO14443_4B: Self = Self(0x03);
    pub const JEWEL: Self = Self(0x04);
    pub const MIFARE: Self = Self(0x10);
    pub const FELICA_212: Self = Self(0x11);
    pub const FELICA_424: Self = Self(0x12);
    pub const ISO14443_4A: Self = Self(0x20);
    pub const ISO14443_4B_ALT: Self = Self(0x23);

    /// Modulation a reported target of this type was found with. The low
    /// nibble carries the baud rate; bit 0x04 marks Jewel.
    pub fn baud_rate(self) -> BaudRate {
        match self.0 {
            0x04 => BaudRate::Jewel106,
            0x03 | 0x23 => BaudRate::TypeB106,
            t if t & 0x0F == 0x01 => BaudRate::Felica212,
            t if t & 0x0F == 0x02 => BaudRate::Felica424,
            _ => BaudRate::TypeA106,
        }
    }
}

/// InListPassiveTarget: MaxTg, BrTy, InitiatorData[]
pub fn encode_in_list_passive_target(
    max_targets: u8,
    baud_rate: BaudRate,
    initiator_data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + initiator_data.len());
    buf.push(cmd::IN_LIST_PASSIVE_TARGET);
    buf.push(max_targets);
    buf.push(baud_rate.code());
    buf.extend_from_slice(initiator_data);
    buf
}

pub fn encode_in_data_exchange(target: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + data.len());
    buf.push(cmd::IN_DATA_EXCHANGE);
    buf.push(target);
    buf.extend_from_slice(data);
    buf
}

pub fn encode_in_communicate_thru(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(cmd::IN_COMMUNICATE_THRU);
    buf.extend_from_slice(data);
    buf
}

pub fn encode_in_release(target: u8) -> Vec<u8> {
    vec![cmd::IN_RELEASE, target]
}

pub fn encode_in_select(target: u8) -> Vec<u8> {
    vec![cmd::IN_SELECT, target]
}

/// InAutoPoll: PollNr, Period (x150 ms), Type1..TypeN
pub fn encode_in_auto_poll(poll_count: u8, period: u8, types: &[AutoPollType]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + types.len());
    buf.push(cmd::IN_AUTO_POLL);
    buf.push(poll_count);
    buf.push(period);
    buf.extend(types.iter().map(|t| t.0));
    buf
}
