//! Small helpers shared across the crate: hex formatting for UIDs and
//! frame dumps, timeout constants, and the cancellation context every
//! blocking call observes.

pub mod cancel;
pub mod hex;
pub mod timeout;

pub use cancel::*;
pub use hex::*;
pub use timeout::*;
