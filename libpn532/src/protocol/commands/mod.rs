// libpn532-rs/libpn532/src/protocol/commands/mod.rs

pub mod initiator;
pub mod system;

pub use initiator::{
    AutoPollType, encode_in_auto_poll, encode_in_communicate_thru, encode_in_data_exchange,
    encode_in_list_passive_target, encode_in_release, encode_in_select,
};
pub use system::{
    DiagnoseTest, RfConfigItem, encode_diagnose, encode_get_firmware_version,
    encode_get_general_status, encode_power_down, encode_rf_configuration,
    encode_sam_configuration,
};

use crate::constants::{MAX_PARAMS_LEN, cmd};
use crate::types::{BaudRate, SamMode, WakeupSources};
use crate::{Error, Result};

/// High-level Command enum. New commands should be added here and
/// their encoder placed in `protocol::commands::{system,initiator}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Diagnose {
        test: DiagnoseTest,
    },
    GetFirmwareVersion,
    GetGeneralStatus,
    SamConfiguration {
        mode: SamMode,
        use_irq: bool,
    },
    PowerDown {
        wakeup: WakeupSources,
        generate_irq: Option<bool>,
    },
    RfConfiguration {
        item: RfConfigItem,
    },
    InListPassiveTarget {
        max_targets: u8,
        baud_rate: BaudRate,
        initiator_data: Vec<u8>,
    },
    InDataExchange {
        target: u8,
        data: Vec<u8>,
    },
    InCommunicateThru {
        data: Vec<u8>,
    },
    InRelease {
        /// 0 releases every target
        target: u8,
    },
    InSelect {
        target: u8,
    },
    InAutoPoll {
        poll_count: u8,
        period: u8,
        types: Vec<AutoPollType>,
    },
}

impl Command {
    /// PN532 command code; the response carries `code + 1`.
    pub fn command_code(&self) -> u8 {
        match self {
            Self::Diagnose { .. } => cmd::DIAGNOSE,
            Self::GetFirmwareVersion => cmd::GET_FIRMWARE_VERSION,
            Self::GetGeneralStatus => cmd::GET_GENERAL_STATUS,
            Self::SamConfiguration { .. } => cmd::SAM_CONFIGURATION,
            Self::PowerDown { .. } => cmd::POWER_DOWN,
            Self::RfConfiguration { .. } => cmd::RF_CONFIGURATION,
            Self::InListPassiveTarget { .. } => cmd::IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => cmd::IN_DATA_EXCHANGE,
            Self::InCommunicateThru { .. } => cmd::IN_COMMUNICATE_THRU,
            Self::InRelease { .. } => cmd::IN_RELEASE,
            Self::InSelect { .. } => cmd::IN_SELECT,
            Self::InAutoPoll { .. } => cmd::IN_AUTO_POLL,
        }
    }

    pub fn response_code(&self) -> u8 {
        self.command_code().wrapping_add(1)
    }

    /// Encode the command into the raw payload (command code + params).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Diagnose { test } => encode_diagnose(test),
            Self::GetFirmwareVersion => encode_get_firmware_version(),
            Self::GetGeneralStatus => encode_get_general_status(),
            Self::SamConfiguration { mode, use_irq } => encode_sam_configuration(*mode, *use_irq),
            Self::PowerDown {
                wakeup,
                generate_irq,
            } => encode_power_down(*wakeup, *generate_irq),
            Self::RfConfiguration { item } => encode_rf_configuration(item),
            Self::InListPassiveTarget {
                max_targets,
                baud_rate,
                initiator_data,
            } => encode_in_list_passive_target(*max_targets, *baud_rate, initiator_data),
            Self::InDataExchange { target, data } => encode_in_data_exchange(*target, data),
            Self::InCommunicateThru { data } => encode_in_communicate_thru(data),
            Self::InRelease { target } => encode_in_release(*target),
            Self::InSelect { target } => encode_in_select(*target),
            Self::InAutoPoll {
                poll_count,
                period,
                types,
            } => encode_in_auto_poll(*poll_count, *period, types),
        }
    }

    /// Reject parameter combinations the chip would answer with an error
    /// frame, before anything goes on the wire.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::InListPassiveTarget { max_targets, .. } if !(1..=2).contains(max_targets) => {
                return Err(Error::InvalidParameter(format!(
                    "max_targets must be 1 or 2, got {max_targets}"
                )));
            }
            Self::InAutoPoll {
                poll_count,
                period,
                types,
            } => {
                if *poll_count == 0 {
                    return Err(Error::InvalidParameter("poll_count must be >= 1".into()));
                }
                if !(1..=15).contains(period) {
                    return Err(Error::InvalidParameter(format!(
                        "auto-poll period must be 1..=15, got {period}"
                    )));
                }
                if types.is_empty() || types.len() > 15 {
                    return Err(Error::InvalidParameter(format!(
                        "auto-poll needs 1..=15 target types, got {}",
                        types.len()
                    )));
                }
            }
            _ => {}
        }

        let params_len = self.encode().len() - 1;
        if params_len > MAX_PARAMS_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_PARAMS_LEN,
                actual: params_len,
            });
        }
        Ok(())
    }
}
