// libpn532-rs/libpn532/src/protocol/checksum.rs

/// Modulo-256 sum of a byte slice.
pub fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Length checksum: LEN + LCS == 0 (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Length checksum of an extended frame: LENM + LENL + LCS == 0 (mod 256)
pub fn extended_lcs(len: u16) -> u8 {
    let [hi, lo] = len.to_be_bytes();
    0u8.wrapping_sub(hi.wrapping_add(lo))
}

/// Data checksum over TFI + data bytes: TFI + data + DCS == 0 (mod 256)
pub fn dcs(tfi_and_data: &[u8]) -> u8 {
    0u8.wrapping_sub(sum(tfi_and_data))
}
