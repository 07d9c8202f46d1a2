// libpn532-rs/libpn532/src/tag/mod.rs

//! Detected tag record and its classification.

pub mod classify;

use derive_more::Display;

use crate::protocol::{TargetData, TargetInfo};
use crate::types::{BaudRate, Pmm, SystemCode, TagType, Uid};

pub use classify::{classify, classify_type_a, type_from_version};

/// A tag found by one detection. Immutable once built; the hex form of the
/// UID is computed at construction and always matches the bytes.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "{} {}", tag_type, uid_hex)]
pub struct DetectedTag {
    tag_type: TagType,
    uid: Uid,
    uid_hex: String,
    target_number: u8,
    baud_rate: BaudRate,
    atqa: Option<u16>,
    sak: Option<u8>,
    ats: Option<Vec<u8>>,
    pmm: Option<Pmm>,
    system_code: Option<SystemCode>,
    target_data: Vec<u8>,
}

impl DetectedTag {
    pub fn from_target(target: &TargetData) -> Self {
        let uid = target.info.uid();
        let (atqa, sak, ats, pmm, system_code) = match &target.info {
            TargetInfo::TypeA { atqa, sak, ats, .. } => {
                (Some(*atqa), Some(*sak), ats.clone(), None, None)
            }
            TargetInfo::Felica {
                pmm, system_code, ..
            } => (None, None, None, Some(*pmm), *system_code),
            TargetInfo::TypeB { .. } | TargetInfo::Jewel { .. } => (None, None, None, None, None),
        };

        Self {
            tag_type: classify(target),
            uid_hex: uid.to_hex(),
            uid,
            target_number: target.target_number,
            baud_rate: target.baud_rate,
            atqa,
            sak,
            ats,
            pmm,
            system_code,
            target_data: target.raw.clone(),
        }
    }

    /// Same tag with a refined type (after a GET_VERSION probe).
    pub(crate) fn with_tag_type(mut self, tag_type: TagType) -> Self {
        self.tag_type = tag_type;
        self
    }

    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    pub fn uid(&self) -> &[u8] {
        self.uid.as_bytes()
    }

    /// Lower-case hex of `uid()`
    pub fn uid_hex(&self) -> &str {
        &self.uid_hex
    }

    /// Logical target number (Tg) for follow-up commands
    pub fn target_number(&self) -> u8 {
        self.target_number
    }

    pub fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    pub fn atqa(&self) -> Option<u16> {
        self.atqa
    }

    pub fn sak(&self) -> Option<u8> {
        self.sak
    }

    pub fn ats(&self) -> Option<&[u8]> {
        self.ats.as_deref()
    }

    pub fn pmm(&self) -> Option<&Pmm> {
        self.pmm.as_ref()
    }

    pub fn system_code(&self) -> Option<SystemCode> {
        self.system_code
    }

    /// Target descriptor bytes as the chip reported them
    pub fn target_data(&self) -> &[u8] {
        &self.target_data
    }

    /// True when the tag passes both filters; `None` means "any".
    pub fn matches(&self, tag_type: Option<TagType>, uid: Option<&[u8]>) -> bool {
        tag_type.is_none_or(|t| t == self.tag_type) && uid.is_none_or(|u| u == self.uid())
    }
}
