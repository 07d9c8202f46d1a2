// libpn532-rs/libpn532/src/lib.rs

//! libpn532
//!
//! Pure Rust host-side driver for NXP PN532 NFC controllers: frame codec,
//! retrying transport wrapper, typed commands, tag detection and NDEF TLV
//! parsing.
#![warn(missing_docs)]

pub mod constants;
pub mod detect;
pub mod device;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
