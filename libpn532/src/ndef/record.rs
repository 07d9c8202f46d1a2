// libpn532-rs/libpn532/src/ndef/record.rs

use crate::ndef::tlv::extract_ndef_message;
use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// One record header and the slices it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdefRecord<'a> {
    pub header: u8,
    pub record_type: &'a [u8],
    pub id: Option<&'a [u8]>,
    pub payload: &'a [u8],
}

impl NdefRecord<'_> {
    /// Type Name Format (0 empty, 1 well-known, 2 media, 3 URI, 4 external ...)
    pub fn tnf(&self) -> u8 {
        self.header & TNF_MASK
    }

    pub fn is_message_begin(&self) -> bool {
        self.header & FLAG_MB != 0
    }

    pub fn is_message_end(&self) -> bool {
        self.header & FLAG_ME != 0
    }

    pub fn is_chunked(&self) -> bool {
        self.header & FLAG_CF != 0
    }

    pub fn is_short(&self) -> bool {
        self.header & FLAG_SR != 0
    }
}

/// Iterator over the records of an NDEF message. Yields one `Err` and
/// stops when a header points past the end of the message.
pub struct Records<'a> {
    message: &'a [u8],
    offset: usize,
    failed: bool,
}

pub fn records(message: &[u8]) -> Records<'_> {
    Records {
        message,
        offset: 0,
        failed: false,
    }
}

impl<'a> Records<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset + len;
        if end > self.message.len() {
            return Err(Error::InvalidNdef(format!(
                "record at offset {} needs {} bytes, message has {}",
                self.offset,
                end,
                self.message.len()
            )));
        }
        let out = &self.message[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn next_record(&mut self) -> Result<NdefRecord<'a>> {
        let header = self.take(1)?[0];
        let type_len = self.take(1)?[0] as usize;
        let payload_len = if header & FLAG_SR != 0 {
            self.take(1)?[0] as usize
        } else {
            let b = self.take(4)?;
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
        };
        let id_len = if header & FLAG_IL != 0 {
            Some(self.take(1)?[0] as usize)
        } else {
            None
        };

        let record_type = self.take(type_len)?;
        let id = match id_len {
            Some(n) => Some(self.take(n)?),
            None => None,
        };
        let payload = self.take(payload_len)?;

        Ok(NdefRecord {
            header,
            record_type,
            id,
            payload,
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<NdefRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.message.len() {
            return None;
        }
        let record = self.next_record();
        self.failed = record.is_err();
        Some(record)
    }
}

/// Extract the NDEF message and check that it is non-empty, that every
/// record header fits, that the first record carries MB and that exactly
/// the last record carries ME.
pub fn validate_ndef_message(data: &[u8]) -> Result<&[u8]> {
    let message = extract_ndef_message(data)?;
    if message.is_empty() {
        return Err(Error::InvalidNdef("empty NDEF message".into()));
    }

    let parsed = records(message).collect::<Result<Vec<_>>>()?;
    let (first, last) = match (parsed.first(), parsed.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(Error::InvalidNdef("no records".into())),
    };
    if !first.is_message_begin() {
        return Err(Error::InvalidNdef("first record lacks MB".into()));
    }
    if !last.is_message_end() {
        return Err(Error::InvalidNdef("last record lacks ME".into()));
    }
    if parsed[..parsed.len() - 1].iter().any(|r| r.is_message_end()) {
        return Err(Error::InvalidNdef("ME set before the last record".into()));
    }
    Ok(message)
}
