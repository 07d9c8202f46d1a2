// helpers.rs — mock device construction shared by the test crates

use std::time::Duration;

use libpn532::constants::cmd;
use libpn532::device::{Device, Initialized};
use libpn532::transport::{MockTransport, RetryConfig};
use libpn532::Result;

/// Initialized device over a fresh mock; the test keeps the mock handle.
pub fn mock_device() -> Result<(MockTransport, Device<Initialized>)> {
    libpn532::test_support::seeded_mock_device()
}

/// Same as `mock_device`, with `data` scripted as the reply to every
/// InListPassiveTarget.
pub fn mock_device_with_targets(data: &[u8]) -> Result<(MockTransport, Device<Initialized>)> {
    let (mock, dev) = mock_device()?;
    mock.script_frame(cmd::IN_LIST_PASSIVE_TARGET, data)?;
    Ok((mock, dev))
}

/// Retry policy with millisecond backoffs so tests stay fast.
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        jitter: 0.0,
        ..RetryConfig::default()
    }
}

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
