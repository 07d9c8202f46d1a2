//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::device::{Device, Initialized};
use crate::transport::MockTransport;
use crate::Result;

/// GetFirmwareVersion reply of a PN532 v1.6: IC 0x32, Ver 1, Rev 6, Support 7
#[doc(hidden)]
pub const FIRMWARE_RESPONSE: [u8; 13] = [
    0x00, 0x00, 0xFF, 0x06, 0xFA, 0xD5, 0x03, 0x32, 0x01, 0x06, 0x07, 0xE8, 0x00,
];

/// SAMConfiguration reply
#[doc(hidden)]
pub const SAM_RESPONSE: [u8; 9] = [0x00, 0x00, 0xFF, 0x02, 0xFE, 0xD5, 0x15, 0x16, 0x00];

/// Queue the two replies `Device::initialize` consumes.
#[doc(hidden)]
pub fn seed_init(mock: &MockTransport) {
    mock.push_response(FIRMWARE_RESPONSE.to_vec());
    mock.push_response(SAM_RESPONSE.to_vec());
}

/// Queue the init replies followed by `frames`, pushed as-is.
#[doc(hidden)]
pub fn seed_init_and_frames(mock: &MockTransport, frames: Vec<Vec<u8>>) {
    seed_init(mock);
    for f in frames {
        mock.push_response(f);
    }
}

/// Create and initialize a Device backed by a clone of `mock`. The caller
/// keeps `mock` for scripting and assertions; it must already hold the init
/// replies (see `seed_init`).
#[doc(hidden)]
pub fn initialized_mock_device(mock: &MockTransport) -> Result<Device<Initialized>> {
    Device::new_with_transport(Box::new(mock.clone()))?.initialize()
}

/// Same as `initialized_mock_device`, seeding the init replies first.
#[doc(hidden)]
pub fn seeded_mock_device() -> Result<(MockTransport, Device<Initialized>)> {
    let mock = MockTransport::default();
    seed_init(&mock);
    let device = initialized_mock_device(&mock)?;
    Ok((mock, device))
}
