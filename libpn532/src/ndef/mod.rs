// libpn532-rs/libpn532/src/ndef/mod.rs

//! NDEF message location inside a tag memory image (TLV scan) and a light
//! record-header walk.

pub mod record;
pub mod tlv;

pub use record::{NdefRecord, Records, records, validate_ndef_message};
pub use tlv::{extract_ndef_message, find_ndef_tlv, parse_tlv_length, skip_tlv, wrap_ndef_tlv};
