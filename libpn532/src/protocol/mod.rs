// libpn532-rs/libpn532/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::{dcs, lcs};
pub use commands::{AutoPollType, Command, DiagnoseTest, RfConfigItem};
pub use frame::Frame;
pub use responses::{
    AutoPollTarget, FirmwareVersion, GeneralStatus, Response, StatusTarget, TargetData, TargetInfo,
    decode_in_auto_poll, decode_in_list_passive_target, decode_target,
};
