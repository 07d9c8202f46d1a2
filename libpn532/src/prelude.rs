// libpn532-rs/libpn532/src/prelude.rs

pub use crate::detect::WaitOptions;
pub use crate::device::{Device, DeviceBuilder, DeviceConfig, DeviceOption};
pub use crate::device::{Initialized, Uninitialized};
pub use crate::ndef::{extract_ndef_message, find_ndef_tlv, validate_ndef_message};
pub use crate::protocol::{Command, FirmwareVersion, Response};
pub use crate::tag::DetectedTag;
pub use crate::transport::{RetryConfig, Transport};
pub use crate::{
    BaudRate, Error, Pmm, Result, SamMode, SystemCode, TagType, TransportErrorKind,
    TransportType, Uid, WakeupSources,
};

// Re-export small utilities for convenience
pub use crate::utils::{
    CancellationToken, CommandContext, bytes_to_hex, bytes_to_hex_spaced, default_timeout, ms,
};
