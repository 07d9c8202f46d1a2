// libpn532-rs/libpn532/src/protocol/frame.rs

use crate::constants::{
    ERROR_FRAME_CODE, MAX_PARAMS_LEN, POSTAMBLE, PREAMBLE, START_CODE, START_CODE_WINDOW,
    TFI_HOST_TO_PN532, TFI_PN532_TO_HOST,
};
use crate::protocol::checksum::{dcs, extended_lcs, lcs, sum};
use crate::{Error, Result};

/// One decoded unit from the PN532 link.
///
/// Normal information frame:
/// `[00] [00 FF] [LEN] [LCS] [TFI] [data(LEN-1)] [DCS] [00]`
///
/// Extended information frame:
/// `[00] [00 FF] [FF FF] [LENM LENL] [LCS] [TFI] [data] [DCS] [00]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Ack,
    Nack,
    /// Application-level error frame; carries the single data byte (0x7F)
    Error(u8),
    /// Chip -> host information frame. `code` is the response code
    /// (request command + 1), `payload` the bytes that follow it.
    Response { code: u8, payload: Vec<u8> },
}

/// Structural layer of a frame before the direction byte is interpreted.
enum RawFrame {
    Ack,
    Nack,
    /// TFI followed by data bytes, checksums already verified
    Info(Vec<u8>),
}

impl Frame {
    /// Encode host -> PN532 `data` (command code followed by parameters)
    /// into a normal information frame: `data.len() + 8` bytes.
    pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
        encode_with_tfi(TFI_HOST_TO_PN532, data)
    }

    /// Encode a PN532 -> host frame. The driver never sends these; mocks and
    /// tests use them to script chip replies.
    pub fn encode_response(data: &[u8]) -> Result<Vec<u8>> {
        encode_with_tfi(TFI_PN532_TO_HOST, data)
    }

    /// Decode the first frame in `bytes`; trailing bytes after the
    /// postamble are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Frame> {
        Self::decode_prefix(bytes).map(|(frame, _)| frame)
    }

    /// Decode the first frame in `bytes` and report how many bytes it
    /// occupied (leading padding included), so a buffer holding
    /// "ACK + response" can be consumed piecewise.
    pub fn decode_prefix(bytes: &[u8]) -> Result<(Frame, usize)> {
        let (raw, consumed) = parse_raw(bytes)?;
        let frame = match raw {
            RawFrame::Ack => Frame::Ack,
            RawFrame::Nack => Frame::Nack,
            RawFrame::Info(data) => {
                if data.len() == 1 {
                    // LEN == 1: only the error byte, no TFI
                    Frame::Error(data[0])
                } else if data[0] != TFI_PN532_TO_HOST {
                    return Err(Error::InvalidFrame(format!(
                        "unexpected direction byte {:#04x}",
                        data[0]
                    )));
                } else {
                    Frame::Response {
                        code: data[1],
                        payload: data[2..].to_vec(),
                    }
                }
            }
        };
        Ok((frame, consumed))
    }

    /// Decode a host -> PN532 frame into `(command, params)`. Used by the
    /// mock transport to find out which command it is answering.
    pub fn decode_command(bytes: &[u8]) -> Result<(u8, Vec<u8>)> {
        match parse_raw(bytes)?.0 {
            RawFrame::Info(data) if data.len() >= 2 && data[0] == TFI_HOST_TO_PN532 => {
                Ok((data[1], data[2..].to_vec()))
            }
            _ => Err(Error::InvalidFrame("not a host command frame".into())),
        }
    }

    pub fn is_ack(&self) -> bool {
        matches!(self, Frame::Ack)
    }
}

impl Frame {
    /// The error frame's code when it is the standard syntax-error frame.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Frame::Error(code) if *code == ERROR_FRAME_CODE)
    }
}

fn encode_with_tfi(tfi: u8, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() > MAX_PARAMS_LEN + 1 {
        return Err(Error::InvalidLength {
            expected: MAX_PARAMS_LEN + 1,
            actual: data.len(),
        });
    }

    let len = (data.len() + 1) as u8;
    let mut out = Vec::with_capacity(data.len() + 8);
    out.push(PREAMBLE);
    out.extend_from_slice(&START_CODE);
    out.push(len);
    out.push(lcs(len));
    out.push(tfi);
    out.extend_from_slice(data);
    out.push(dcs(&out[5..]));
    out.push(POSTAMBLE);
    Ok(out)
}

/// Index of the `00` that opens the `00 FF` start code, searched within the
/// first `window` bytes.
pub fn find_start_code(bytes: &[u8], window: usize) -> Option<usize> {
    bytes
        .windows(2)
        .take(window)
        .position(|w| w == START_CODE)
}

fn byte(bytes: &[u8], idx: usize) -> Result<u8> {
    bytes.get(idx).copied().ok_or(Error::InvalidLength {
        expected: idx + 1,
        actual: bytes.len(),
    })
}

fn parse_raw(bytes: &[u8]) -> Result<(RawFrame, usize)> {
    let start = find_start_code(bytes, START_CODE_WINDOW).ok_or_else(|| {
        Error::InvalidFrame(format!(
            "start code 00 ff not found in first {} bytes",
            START_CODE_WINDOW
        ))
    })?;
    let i = start + START_CODE.len();

    let len_byte = byte(bytes, i)?;
    let lcs_byte = byte(bytes, i + 1)?;

    let (len, data_start) = match (len_byte, lcs_byte) {
        // ACK/NACK end with the postamble. Anything else after these two
        // bytes is a damaged information frame (LEN 0x01/0xFF with a flipped
        // bit), reported by the LCS check below.
        (0x00, 0xFF) if byte(bytes, i + 2)? == POSTAMBLE => {
            return Ok((RawFrame::Ack, i + 3));
        }
        (0xFF, 0x00) if byte(bytes, i + 2)? == POSTAMBLE => {
            return Ok((RawFrame::Nack, i + 3));
        }
        (0xFF, 0xFF) => {
            let hi = byte(bytes, i + 2)?;
            let lo = byte(bytes, i + 3)?;
            let ext_lcs = byte(bytes, i + 4)?;
            let len = u16::from_be_bytes([hi, lo]);
            if hi.wrapping_add(lo).wrapping_add(ext_lcs) != 0 {
                return Err(Error::ChecksumMismatch {
                    expected: extended_lcs(len),
                    actual: ext_lcs,
                });
            }
            (len as usize, i + 5)
        }
        (len, actual) => {
            if len.wrapping_add(actual) != 0 {
                return Err(Error::ChecksumMismatch {
                    expected: lcs(len),
                    actual,
                });
            }
            (len as usize, i + 2)
        }
    };

    if len == 0 {
        return Err(Error::InvalidFrame("zero-length information frame".into()));
    }

    // data + DCS + postamble
    let required = data_start + len + 2;
    if bytes.len() < required {
        return Err(Error::InvalidLength {
            expected: required,
            actual: bytes.len(),
        });
    }

    let data = &bytes[data_start..data_start + len];
    let dcs_actual = bytes[data_start + len];
    if sum(data).wrapping_add(dcs_actual) != 0 {
        return Err(Error::ChecksumMismatch {
            expected: dcs(data),
            actual: dcs_actual,
        });
    }

    if bytes[data_start + len + 1] != POSTAMBLE {
        return Err(Error::InvalidFrame("invalid postamble".into()));
    }

    Ok((RawFrame::Info(data.to_vec()), required))
}
