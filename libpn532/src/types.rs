// libpn532-rs/libpn532/src/types.rs

use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;
use std::ops::{BitOr, BitOrAssign};

/// UID - Newtype Pattern (4, 7 または 10 バイト / FeliCa は IDm 8 バイト)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl From<&[u8]> for Uid {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// PMm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pmm([u8; 8]);

impl Pmm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

/// FeliCa SystemCode (u16, big-endian on the air)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemCode(u16);

impl SystemCode {
    pub const ANY: Self = Self(0xffff);
    pub const NDEF: Self = Self(0x12fc);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// Tag family reported by the detection engine.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagType {
    #[display(fmt = "NTAG")]
    Ntag,
    #[display(fmt = "MIFARE Classic 1K")]
    Mifare1k,
    #[display(fmt = "MIFARE Classic 4K")]
    Mifare4k,
    #[display(fmt = "MIFARE Ultralight")]
    MifareUltralight,
    #[display(fmt = "FeliCa")]
    Felica,
    #[display(fmt = "Unknown")]
    Unknown,
}

/// Baud rate / modulation (BrTy) for InListPassiveTarget.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudRate {
    /// 106 kbps ISO/IEC 14443 type A
    #[display(fmt = "106 kbps type A")]
    TypeA106 = 0x00,
    /// 212 kbps FeliCa
    #[display(fmt = "212 kbps FeliCa")]
    Felica212 = 0x01,
    /// 424 kbps FeliCa
    #[display(fmt = "424 kbps FeliCa")]
    Felica424 = 0x02,
    /// 106 kbps ISO/IEC 14443-3 type B
    #[display(fmt = "106 kbps type B")]
    TypeB106 = 0x03,
    /// 106 kbps Innovision Jewel
    #[display(fmt = "106 kbps Jewel")]
    Jewel106 = 0x04,
}

impl BaudRate {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_felica(self) -> bool {
        matches!(self, Self::Felica212 | Self::Felica424)
    }

    /// Initiator data the chip needs for this modulation. FeliCa requires
    /// a polling request, type B an AFI byte; type A and Jewel need none.
    pub fn default_initiator_data(self) -> &'static [u8] {
        match self {
            Self::Felica212 | Self::Felica424 => &crate::constants::FELICA_DEFAULT_POLLING,
            Self::TypeB106 => &[0x00],
            Self::TypeA106 | Self::Jewel106 => &[],
        }
    }
}

impl TryFrom<u8> for BaudRate {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(Self::TypeA106),
            0x01 => Ok(Self::Felica212),
            0x02 => Ok(Self::Felica424),
            0x03 => Ok(Self::TypeB106),
            0x04 => Ok(Self::Jewel106),
            other => Err(Error::InvalidParameter(format!(
                "baud rate {other:#04x} is not one of 0x00..=0x04"
            ))),
        }
    }
}

/// Physical link the PN532 is reached over.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportType {
    #[display(fmt = "HSU")]
    Uart,
    #[display(fmt = "I2C")]
    I2c,
    #[display(fmt = "SPI")]
    Spi,
}

/// SAMConfiguration mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamMode {
    /// The SAM is not used; this is the default mode
    Normal,
    /// PN532 + SAM seen as one contactless SAM card. Timeout is in
    /// multiples of 50 ms.
    VirtualCard { timeout: u8 },
    /// The host accesses the SAM with the standard PCD commands
    WiredCard,
    /// PN532 and SAM visible as two separate targets
    DualCard,
}

impl SamMode {
    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0x01,
            Self::VirtualCard { .. } => 0x02,
            Self::WiredCard => 0x03,
            Self::DualCard => 0x04,
        }
    }

    pub fn timeout(self) -> u8 {
        match self {
            Self::VirtualCard { timeout } => timeout,
            // 0x14 * 50 ms = 1 s, the value most host drivers send
            _ => 0x14,
        }
    }
}

/// PowerDown wake-up source mask. Flags are OR-combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WakeupSources(u8);

impl WakeupSources {
    pub const HSU: Self = Self(0x01);
    pub const SPI: Self = Self(0x02);
    pub const I2C: Self = Self(0x04);
    pub const GPIO_P32: Self = Self(0x08);
    pub const GPIO_P34: Self = Self(0x10);
    pub const RF: Self = Self(0x20);
    pub const INT1: Self = Self(0x80);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WakeupSources {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WakeupSources {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
