// libpn532-rs/libpn532/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_be_bytes([data[idx], data[idx + 1]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Fixed-size copy of `N` bytes at `idx`.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Check that a response code equals `expected` (request command + 1).
pub fn expect_response_code(actual: u8, expected: u8) -> Result<()> {
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}

/// Split a status-prefixed payload (InDataExchange, InCommunicateThru,
/// InRelease, InSelect). Error bits live in the low six bits of the status
/// byte; the upper two are MI/NAD flags.
pub fn split_status(data: &[u8]) -> Result<&[u8]> {
    let status = byte_at(data, 0)?;
    check_status(status)?;
    Ok(&data[1..])
}

pub fn check_status(status: u8) -> Result<()> {
    match status & 0x3F {
        0x00 => Ok(()),
        code => Err(Error::ChipError(code)),
    }
}
