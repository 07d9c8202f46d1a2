// libpn532-rs/libpn532/src/protocol/commands/system.rs

use crate::constants::cmd;
use crate::types::{SamMode, WakeupSources};

/// Self-test selector for the Diagnose command (NumTst + InParam).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnoseTest {
    /// Echo `data` back over the host link
    CommunicationLine(Vec<u8>),
    RomTest,
    RamTest,
    /// Antenna self-test with the given threshold byte
    AntennaSelfTest(u8),
    /// Any other test number with raw input parameters
    Raw { test: u8, params: Vec<u8> },
}

impl DiagnoseTest {
    pub fn number(&self) -> u8 {
        match self {
            Self::CommunicationLine(_) => 0x00,
            Self::RomTest => 0x01,
            Self::RamTest => 0x02,
            Self::AntennaSelfTest(_) => 0x07,
            Self::Raw { test, .. } => *test,
        }
    }
}

/// RFConfiguration item with its configuration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RfConfigItem {
    /// CfgItem 0x01: bit 1 = auto RFCA, bit 0 = RF on
    RfField { auto_rfca: bool, rf_on: bool },
    /// CfgItem 0x02: RFU, ATR_RES timeout, retry timeout (encoded 0x00..0x10)
    VariousTimings { atr_res_timeout: u8, retry_timeout: u8 },
    /// CfgItem 0x04: MaxRtyCOM
    MaxRetryCom(u8),
    /// CfgItem 0x05: MxRtyATR, MxRtyPSL, MxRtyPassiveActivation (0xFF = forever)
    MaxRetries {
        atr: u8,
        psl: u8,
        passive_activation: u8,
    },
    Raw { item: u8, data: Vec<u8> },
}

impl RfConfigItem {
    pub fn item(&self) -> u8 {
        match self {
            Self::RfField { .. } => 0x01,
            Self::VariousTimings { .. } => 0x02,
            Self::MaxRetryCom(_) => 0x04,
            Self::MaxRetries { .. } => 0x05,
            Self::Raw { item, .. } => *item,
        }
    }

    fn data(&self) -> Vec<u8> {
        match self {
            Self::RfField { auto_rfca, rf_on } => {
                vec![((*auto_rfca as u8) << 1) | (*rf_on as u8)]
            }
            Self::VariousTimings {
                atr_res_timeout,
                retry_timeout,
            } => vec![0x00, *atr_res_timeout, *retry_timeout],
            Self::MaxRetryCom(n) => vec![*n],
            Self::MaxRetries {
                atr,
                psl,
                passive_activation,
            } => vec![*atr, *psl, *passive_activation],
            Self::Raw { data, .. } => data.clone(),
        }
    }
}

pub fn encode_diagnose(test: &DiagnoseTest) -> Vec<u8> {
    let mut buf = vec![cmd::DIAGNOSE, test.number()];
    match test {
        DiagnoseTest::CommunicationLine(data) => buf.extend_from_slice(data),
        DiagnoseTest::AntennaSelfTest(threshold) => buf.push(*threshold),
        DiagnoseTest::Raw { params, .. } => buf.extend_from_slice(params),
        DiagnoseTest::RomTest | DiagnoseTest::RamTest => {}
    }
    buf
}

pub fn encode_get_firmware_version() -> Vec<u8> {
    vec![cmd::GET_FIRMWARE_VERSION]
}

pub fn encode_get_general_status() -> Vec<u8> {
    vec![cmd::GET_GENERAL_STATUS]
}

/// SAMConfiguration: mode, timeout (x50 ms), IRQ byte. The chip defaults a
/// missing IRQ byte to 0x01, so it is always sent.
pub fn encode_sam_configuration(mode: SamMode, use_irq: bool) -> Vec<u8> {
    vec![
        cmd::SAM_CONFIGURATION,
        mode.code(),
        mode.timeout(),
        use_irq as u8,
    ]
}

/// PowerDown: WakeUpEnable mask and optional GenerateIRQ
pub fn encode_power_down(wakeup: WakeupSources, generate_irq: Option<bool>) -> Vec<u8> {
    let mut buf = vec![cmd::POWER_DOWN, wakeup.bits()];
    if let Some(irq) = generate_irq {
        buf.push(irq as u8);
    }
    buf
}

pub fn encode_rf_configuration(item: &RfConfigItem) -> Vec<u8> {
    let mut buf = vec![cmd::RF_CONFIGURATION, item.item()];
    buf.extend_from_slice(&item.data());
    buf
}
