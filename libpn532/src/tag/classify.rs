// libpn532-rs/libpn532/src/tag/classify.rs

use crate::protocol::{TargetData, TargetInfo};
use crate::types::TagType;

/// SENS_RES shared by NTAG21x and MIFARE Ultralight
pub const ATQA_NTAG: u16 = 0x0044;

/// GET_VERSION product type byte
const PRODUCT_ULTRALIGHT: u8 = 0x03;
const PRODUCT_NTAG: u8 = 0x04;

/// Classify a type A target from SENS_RES / SEL_RES.
pub fn classify_type_a(atqa: Option<u16>, sak: Option<u8>) -> TagType {
    match (atqa, sak) {
        (Some(ATQA_NTAG), Some(0x00)) => TagType::Ntag,
        (_, Some(0x08 | 0x09)) => TagType::Mifare1k,
        (_, Some(0x18 | 0x38)) => TagType::Mifare4k,
        _ => TagType::Unknown,
    }
}

pub fn classify(target: &TargetData) -> TagType {
    match &target.info {
        TargetInfo::TypeA { atqa, sak, .. } => classify_type_a(Some(*atqa), Some(*sak)),
        TargetInfo::Felica { .. } => TagType::Felica,
        TargetInfo::TypeB { .. } | TargetInfo::Jewel { .. } => TagType::Unknown,
    }
}

/// Interpret a GET_VERSION answer (header, vendor, product type, ...).
/// `None` when the product type is not one we distinguish.
pub fn type_from_version(version: &[u8]) -> Option<TagType> {
    match version.get(2).copied() {
        Some(PRODUCT_ULTRALIGHT) => Some(TagType::MifareUltralight),
        Some(PRODUCT_NTAG) => Some(TagType::Ntag),
        _ => None,
    }
}
