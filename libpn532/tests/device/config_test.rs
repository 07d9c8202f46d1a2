#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libpn532::constants::cmd;
use libpn532::transport::RetryConfig;
use libpn532::{DeviceOption, Error, TransportErrorKind};

#[test]
fn retry_policy_change_applies_to_next_command() {
    let (mock, mut dev) = common::helpers::mock_device().unwrap();
    mock.script_response(cmd::GET_FIRMWARE_VERSION, common::fixtures::firmware_frame());
    dev.set_retry_config(RetryConfig::no_retry()).unwrap();

    mock.fail_next_receives(
        cmd::GET_FIRMWARE_VERSION,
        1,
        Error::transport(TransportErrorKind::Io, "glitch"),
    );
    assert!(dev.get_firmware_version().is_err());

    dev.set_retry_config(common::helpers::fast_retry(3)).unwrap();
    mock.fail_next_receives(
        cmd::GET_FIRMWARE_VERSION,
        2,
        Error::transport(TransportErrorKind::Io, "glitch"),
    );
    assert!(dev.get_firmware_version().is_ok());
    // 1 during initialize, 1 failed, 3 for the retried read
    assert_eq!(mock.call_count(cmd::GET_FIRMWARE_VERSION), 5);
}

#[test]
fn rejected_option_keeps_previous_settings() {
    let (_mock, mut dev) = common::helpers::mock_device().unwrap();
    dev.set_timeout(Duration::from_millis(250)).unwrap();

    assert!(dev.apply_option(DeviceOption::MaxRetries(0)).is_err());
    assert!(dev.set_timeout(Duration::ZERO).is_err());

    assert_eq!(dev.timeout(), Duration::from_millis(250));
    assert_eq!(dev.retry_config().max_attempts, 3);
}

#[test]
fn options_are_applied_in_order() {
    let (_mock, mut dev) = common::helpers::mock_device().unwrap();
    dev.apply_option(DeviceOption::MaxRetries(7)).unwrap();
    dev.apply_option(DeviceOption::RetryBackoff(Duration::from_secs(2)))
        .unwrap();
    assert_eq!(dev.retry_config().max_attempts, 7);
    assert_eq!(dev.retry_config().initial_backoff, Duration::from_secs(2));
    assert!(dev.retry_config().max_backoff >= Duration::from_secs(2));
}
