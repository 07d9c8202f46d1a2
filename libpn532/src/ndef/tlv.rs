// libpn532-rs/libpn532/src/ndef/tlv.rs

use crate::{Error, Result};

/// TLV tag bytes found in a Type 2 tag memory image
pub mod tag {
    pub const NULL: u8 = 0x00;
    pub const LOCK_CONTROL: u8 = 0x01;
    pub const MEMORY_CONTROL: u8 = 0x02;
    pub const NDEF_MESSAGE: u8 = 0x03;
    pub const PROPRIETARY: u8 = 0xFD;
    pub const TERMINATOR: u8 = 0xFE;
}

/// Marks the three-byte length form
const LONG_FORM: u8 = 0xFF;

/// Length of the TLV whose tag byte sits at `i`, and where its value
/// starts. Short form: one length byte, value at `i + 2`. Long form: `FF`
/// plus a big-endian u16, value at `i + 4`.
///
/// `None` when the length field itself runs past the buffer.
pub fn parse_tlv_length(data: &[u8], i: usize) -> Option<(usize, usize)> {
    match *data.get(i + 1)? {
        LONG_FORM => {
            let hi = *data.get(i + 2)?;
            let lo = *data.get(i + 3)?;
            Some((u16::from_be_bytes([hi, lo]) as usize, i + 4))
        }
        len => Some((len as usize, i + 2)),
    }
}

/// Index just past the TLV at `i`; handles both length forms.
pub fn skip_tlv(data: &[u8], i: usize) -> Result<usize> {
    let malformed = || Error::MalformedTlv {
        offset: i,
        tag: data.get(i).copied().unwrap_or(0),
    };
    let (len, value_start) = parse_tlv_length(data, i).ok_or_else(malformed)?;
    let end = value_start + len;
    if end > data.len() {
        return Err(malformed());
    }
    Ok(end)
}

/// Locate the NDEF message TLV. `Ok(None)` when the scan reaches the end
/// of the buffer or a terminator first; the returned slice borrows from
/// `data`.
pub fn find_ndef_tlv(data: &[u8]) -> Result<Option<&[u8]>> {
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            tag::NULL => i += 1,
            tag::TERMINATOR => return Ok(None),
            tag::NDEF_MESSAGE => {
                let (len, start) = parse_tlv_length(data, i).ok_or(Error::TruncatedNdef {
                    needed: header_len(data, i),
                    available: data.len() - i,
                })?;
                let end = start + len;
                if end > data.len() {
                    return Err(Error::TruncatedNdef {
                        needed: end - i,
                        available: data.len() - i,
                    });
                }
                return Ok(Some(&data[start..end]));
            }
            tag::LOCK_CONTROL | tag::MEMORY_CONTROL | tag::PROPRIETARY => {
                i = skip_tlv(data, i)?;
            }
            other => {
                return Err(Error::MalformedTlv {
                    offset: i,
                    tag: other,
                })
            }
        }
    }
    Ok(None)
}

fn header_len(data: &[u8], i: usize) -> usize {
    match data.get(i + 1) {
        Some(&LONG_FORM) => 4,
        _ => 2,
    }
}

/// Like `find_ndef_tlv`, but a missing message is `NoNdefTlv`.
pub fn extract_ndef_message(data: &[u8]) -> Result<&[u8]> {
    find_ndef_tlv(data)?.ok_or(Error::NoNdefTlv)
}

/// Build a memory image holding `message` in an NDEF TLV followed by a
/// terminator.
pub fn wrap_ndef_tlv(message: &[u8]) -> Result<Vec<u8>> {
    let len = message.len();
    let mut out = Vec::with_capacity(len + 5);
    out.push(tag::NDEF_MESSAGE);
    if len < LONG_FORM as usize {
        out.push(len as u8);
    } else {
        let len = u16::try_from(len).map_err(|_| {
            Error::InvalidNdef(format!("message of {len} bytes does not fit a TLV"))
        })?;
        out.push(LONG_FORM);
        out.extend_from_slice(&len.to_be_bytes());
    }
    out.extend_from_slice(message);
    out.push(tag::TERMINATOR);
    Ok(out)
}
