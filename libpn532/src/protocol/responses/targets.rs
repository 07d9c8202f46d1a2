// libpn532-rs/libpn532/src/protocol/responses/targets.rs

use crate::protocol::commands::AutoPollType;
use crate::protocol::parser;
use crate::types::{BaudRate, Pmm, SystemCode, Uid};
use crate::Result;

/// Modulation-specific part of a target descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetInfo {
    /// ISO/IEC 14443 type A (MIFARE, NTAG, ...)
    TypeA {
        /// SENS_RES, big-endian as transmitted (NTAG: 0x0044)
        atqa: u16,
        /// SEL_RES
        sak: u8,
        uid: Uid,
        /// ATS including its length byte, present when SAK bit 0x20 is set
        ats: Option<Vec<u8>>,
    },
    Felica {
        idm: [u8; 8],
        pmm: Pmm,
        system_code: Option<SystemCode>,
    },
    TypeB {
        atqb: [u8; 12],
        attrib_res: Vec<u8>,
    },
    Jewel {
        sens_res: [u8; 2],
        jewel_id: [u8; 4],
    },
}

impl TargetInfo {
    /// Identifier bytes: NFCID1 for type A, IDm for FeliCa, PUPI for
    /// type B, the 4-byte ID for Jewel.
    pub fn uid(&self) -> Uid {
        match self {
            Self::TypeA { uid, .. } => uid.clone(),
            Self::Felica { idm, .. } => Uid::from(&idm[..]),
            Self::TypeB { atqb, .. } => Uid::from(&atqb[1..5]),
            Self::Jewel { jewel_id, .. } => Uid::from(&jewel_id[..]),
        }
    }
}

/// One target as reported by InListPassiveTarget or InAutoPoll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetData {
    /// Logical target number (Tg) used by InDataExchange/InSelect/InRelease
    pub target_number: u8,
    pub baud_rate: BaudRate,
    pub info: TargetInfo,
    /// Descriptor bytes exactly as received, starting at Tg
    pub raw: Vec<u8>,
}

/// InAutoPoll reports the polled type alongside each target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPollTarget {
    pub poll_type: AutoPollType,
    pub target: TargetData,
}

/// Parse one target descriptor at the head of `data`; returns it and the
/// number of bytes it occupied.
pub fn decode_target(baud_rate: BaudRate, data: &[u8]) -> Result<(TargetData, usize)> {
    let tg = parser::byte_at(data, 0)?;
    let (info, used) = match baud_rate {
        BaudRate::TypeA106 => decode_type_a(data)?,
        BaudRate::Felica212 | BaudRate::Felica424 => decode_felica(data)?,
        BaudRate::TypeB106 => decode_type_b(data)?,
        BaudRate::Jewel106 => decode_jewel(data)?,
    };
    Ok((
        TargetData {
            target_number: tg,
            baud_rate,
            info,
            raw: data[..used].to_vec(),
        },
        used,
    ))
}

/// Tg, SENS_RES(2), SEL_RES, NFCIDLength, NFCID1[], [ATS]
fn decode_type_a(data: &[u8]) -> Result<(TargetInfo, usize)> {
    let atqa = parser::be_u16_at(data, 1)?;
    let sak = parser::byte_at(data, 3)?;
    let uid_len = parser::byte_at(data, 4)? as usize;
    let uid = Uid::from(parser::slice_at(data, 5, uid_len)?);
    let mut used = 5 + uid_len;

    let mut ats = None;
    if sak & 0x20 != 0 {
        if let Some(&tl) = data.get(used) {
            // TL counts itself
            let tl = (tl as usize).max(1);
            ats = Some(parser::slice_at(data, used, tl)?.to_vec());
            used += tl;
        }
    }

    Ok((TargetInfo::TypeA { atqa, sak, uid, ats }, used))
}

/// Tg, POL_RES length, 0x01, IDm(8), PMm(8), [SYST_CODE(2)]
fn decode_felica(data: &[u8]) -> Result<(TargetInfo, usize)> {
    let pol_len = parser::byte_at(data, 1)? as usize;
    parser::ensure_len(data, 1 + pol_len.max(18))?;
    let idm = parser::array_at::<8>(data, 3)?;
    let pmm = Pmm::from_bytes(parser::array_at::<8>(data, 11)?);
    let system_code = if pol_len >= 20 {
        Some(SystemCode::new(parser::be_u16_at(data, 19)?))
    } else {
        None
    };
    Ok((
        TargetInfo::Felica {
            idm,
            pmm,
            system_code,
        },
        1 + pol_len.max(18),
    ))
}

/// Tg, ATQB(12), ATTRIB_RES length, ATTRIB_RES[]
fn decode_type_b(data: &[u8]) -> Result<(TargetInfo, usize)> {
    let atqb = parser::array_at::<12>(data, 1)?;
    let attrib_len = parser::byte_at(data, 13)? as usize;
    let attrib_res = parser::slice_at(data, 14, attrib_len)?.to_vec();
    Ok((TargetInfo::TypeB { atqb, attrib_res }, 14 + attrib_len))
}

/// Tg, SENS_RES(2), JEWELID(4)
fn decode_jewel(data: &[u8]) -> Result<(TargetInfo, usize)> {
    let sens_res = parser::array_at::<2>(data, 1)?;
    let jewel_id = parser::array_at::<4>(data, 3)?;
    Ok((TargetInfo::Jewel { sens_res, jewel_id }, 7))
}

/// InListPassiveTarget output: NbTg followed by NbTg descriptors.
pub fn decode_in_list_passive_target(baud_rate: BaudRate, data: &[u8]) -> Result<Vec<TargetData>> {
    let count = parser::byte_at(data, 0)? as usize;
    let mut targets = Vec::with_capacity(count);
    let mut offset = 1;
    for _ in 0..count {
        let (target, used) = decode_target(baud_rate, &data[offset..])?;
        offset += used;
        targets.push(target);
    }
    Ok(targets)
}

/// InAutoPoll output: NbTg, then [Type, TgDataLen, TargetData] per target.
pub fn decode_in_auto_poll(data: &[u8]) -> Result<Vec<AutoPollTarget>> {
    let count = parser::byte_at(data, 0)? as usize;
    let mut targets = Vec::with_capacity(count);
    let mut offset = 1;
    for _ in 0..count {
        let poll_type = AutoPollType(parser::byte_at(data, offset)?);
        let len = parser::byte_at(data, offset + 1)? as usize;
        let body = parser::slice_at(data, offset + 2, len)?;
        let (target, _) = decode_target(poll_type.baud_rate(), body)?;
        targets.push(AutoPollTarget { poll_type, target });
        offset += 2 + len;
    }
    Ok(targets)
}
