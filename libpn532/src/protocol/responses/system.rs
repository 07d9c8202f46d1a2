// libpn532-rs/libpn532/src/protocol/responses/system.rs

use derive_more::Display;

use crate::protocol::parser;
use crate::types::BaudRate;
use crate::Result;

/// GetFirmwareVersion output: IC, Ver, Rev, Support
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "PN5{:02x} v{}.{}", ic, version, revision)]
pub struct FirmwareVersion {
    pub ic: u8,
    pub version: u8,
    pub revision: u8,
    pub support: u8,
}

impl FirmwareVersion {
    pub fn supports_iso14443a(&self) -> bool {
        self.support & 0x01 != 0
    }

    pub fn supports_iso14443b(&self) -> bool {
        self.support & 0x02 != 0
    }

    pub fn supports_iso18092(&self) -> bool {
        self.support & 0x04 != 0
    }
}

/// Layout: IC(1) Ver(1) Rev(1) Support(1)
pub fn decode_firmware_version(data: &[u8]) -> Result<FirmwareVersion> {
    parser::ensure_len(data, 4)?;
    Ok(FirmwareVersion {
        ic: data[0],
        version: data[1],
        revision: data[2],
        support: data[3],
    })
}

/// One target entry in GetGeneralStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTarget {
    pub target_number: u8,
    pub rx_baud: u8,
    pub tx_baud: u8,
    pub modulation: u8,
}

/// GetGeneralStatus output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralStatus {
    /// Last error code (low six bits), 0 when none
    pub last_error: u8,
    pub rf_field_on: bool,
    pub targets: Vec<StatusTarget>,
    pub sam_status: Option<u8>,
}

impl GeneralStatus {
    /// Baud rate of the first listed target, if the chip reports one we know.
    pub fn first_target_baud(&self) -> Option<BaudRate> {
        self.targets
            .first()
            .and_then(|t| BaudRate::try_from(t.rx_baud).ok())
    }
}

/// Layout: Err(1) Field(1) NbTg(1) [Tg BrRx BrTx Type]*NbTg SAM(1)
pub fn decode_general_status(data: &[u8]) -> Result<GeneralStatus> {
    parser::ensure_len(data, 3)?;
    let count = data[2] as usize;
    let mut targets = Vec::with_capacity(count);
    for i in 0..count {
        let t = parser::slice_at(data, 3 + i * 4, 4)?;
        targets.push(StatusTarget {
            target_number: t[0],
            rx_baud: t[1],
            tx_baud: t[2],
            modulation: t[3],
        });
    }
    Ok(GeneralStatus {
        last_error: data[0] & 0x3F,
        rf_field_on: data[1] != 0,
        targets,
        sam_status: data.get(3 + count * 4).copied(),
    })
}
