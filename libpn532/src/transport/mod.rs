// libpn532-rs/libpn532/src/transport/mod.rs

pub mod mock;
pub mod retry;
pub mod traits;

pub use mock::MockTransport;
pub use retry::{RetryConfig, RetryingTransport};
pub use traits::Transport;
