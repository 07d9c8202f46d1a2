//! Hexadecimal helpers for UIDs and frame dumps.

use std::fmt::Write;

/// Lower-case hex without separators: `&[0x04, 0xaa]` -> `"04aa"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

/// Lower-case hex with one space between bytes, used in frame dumps:
/// `&[0x00, 0xff]` -> `"00 ff"`.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
