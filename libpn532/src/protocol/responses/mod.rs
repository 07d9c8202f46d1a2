// libpn532-rs/libpn532/src/protocol/responses/mod.rs

pub mod system;
pub mod targets;

pub use system::{
    FirmwareVersion, GeneralStatus, StatusTarget, decode_firmware_version, decode_general_status,
};
pub use targets::{
    AutoPollTarget, TargetData, TargetInfo, decode_in_auto_poll, decode_in_list_passive_target,
    decode_target,
};

use crate::protocol::commands::Command;
use crate::protocol::parser;
use crate::Result;

/// High-level Response enum. Per-command decoders live in
/// `protocol::responses::{system,targets}` and are dispatched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Diagnose { result: Vec<u8> },
    FirmwareVersion(FirmwareVersion),
    GeneralStatus(GeneralStatus),
    SamConfiguration,
    PowerDown,
    RfConfiguration,
    InListPassiveTarget { targets: Vec<TargetData> },
    InDataExchange { data: Vec<u8> },
    InCommunicateThru { data: Vec<u8> },
    InRelease,
    InSelect,
    InAutoPoll { targets: Vec<AutoPollTarget> },
}

impl Response {
    /// Decode the payload of a response frame for the command that was
    /// sent. `code` is the frame's response code and must equal the
    /// command code + 1.
    pub fn decode(command: &Command, code: u8, payload: &[u8]) -> Result<Self> {
        parser::expect_response_code(code, command.response_code())?;

        match command {
            Command::Diagnose { .. } => Ok(Self::Diagnose {
                result: payload.to_vec(),
            }),
            Command::GetFirmwareVersion => {
                Ok(Self::FirmwareVersion(decode_firmware_version(payload)?))
            }
            Command::GetGeneralStatus => Ok(Self::GeneralStatus(decode_general_status(payload)?)),
            Command::SamConfiguration { .. } => Ok(Self::SamConfiguration),
            Command::PowerDown { .. } => {
                // Status byte is optional on older firmware
                if let Some(&status) = payload.first() {
                    parser::check_status(status)?;
                }
                Ok(Self::PowerDown)
            }
            Command::RfConfiguration { .. } => Ok(Self::RfConfiguration),
            Command::InListPassiveTarget { baud_rate, .. } => Ok(Self::InListPassiveTarget {
                targets: decode_in_list_passive_target(*baud_rate, payload)?,
            }),
            Command::InDataExchange { .. } => Ok(Self::InDataExchange {
                data: parser::split_status(payload)?.to_vec(),
            }),
            Command::InCommunicateThru { .. } => Ok(Self::InCommunicateThru {
                data: parser::split_status(payload)?.to_vec(),
            }),
            Command::InRelease { .. } => {
                parser::split_status(payload)?;
                Ok(Self::InRelease)
            }
            Command::InSelect { .. } => {
                parser::split_status(payload)?;
                Ok(Self::InSelect)
            }
            Command::InAutoPoll { .. } => Ok(Self::InAutoPoll {
                targets: decode_in_auto_poll(payload)?,
            }),
        }
    }

    /// Return the response code byte associated with this response variant.
    pub fn response_code(&self) -> u8 {
        use crate::constants::cmd;
        let command = match self {
            Self::Diagnose { .. } => cmd::DIAGNOSE,
            Self::FirmwareVersion(_) => cmd::GET_FIRMWARE_VERSION,
            Self::GeneralStatus(_) => cmd::GET_GENERAL_STATUS,
            Self::SamConfiguration => cmd::SAM_CONFIGURATION,
            Self::PowerDown => cmd::POWER_DOWN,
            Self::RfConfiguration => cmd::RF_CONFIGURATION,
            Self::InListPassiveTarget { .. } => cmd::IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => cmd::IN_DATA_EXCHANGE,
            Self::InCommunicateThru { .. } => cmd::IN_COMMUNICATE_THRU,
            Self::InRelease => cmd::IN_RELEASE,
            Self::InSelect => cmd::IN_SELECT,
            Self::InAutoPoll { .. } => cmd::IN_AUTO_POLL,
        };
        command + 1
    }
}
