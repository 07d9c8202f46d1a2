#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::{Duration, Instant};

use libpn532::constants::cmd;
use libpn532::transport::RetryConfig;
use libpn532::{CancellationToken, Error};
use serial_test::serial;

/// Cancel `token` from another thread after `after`.
fn cancel_later(token: CancellationToken, after: Duration) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(after);
        token.cancel();
    })
}

#[test]
#[serial]
fn cancel_while_waiting_for_ack() {
    let (mock, mut dev) = common::helpers::mock_device().unwrap();
    dev.set_timeout(Duration::from_secs(5)).unwrap();
    dev.set_retry_config(RetryConfig::no_retry()).unwrap();
    let token = CancellationToken::new();
    dev.set_cancellation_token(Some(token.clone()));

    // nothing scripted: the chip never answers
    let canceller = cancel_later(token, Duration::from_millis(50));
    let start = Instant::now();
    let err = dev.get_general_status().unwrap_err();
    canceller.join().unwrap();

    assert!(matches!(err, Error::Canceled), "got {err:?}");
    assert!(start.elapsed() < Duration::from_secs(1), "{:?}", start.elapsed());
    assert_eq!(mock.call_count(cmd::GET_GENERAL_STATUS), 1);
}

#[test]
#[serial]
fn cancel_between_ack_and_response() {
    let (mock, mut dev) = common::helpers::mock_device().unwrap();
    // ACK arrives, the response never does
    mock.set_auto_ack(true);
    dev.set_timeout(Duration::from_secs(5)).unwrap();
    let token = CancellationToken::new();
    dev.set_cancellation_token(Some(token.clone()));

    let canceller = cancel_later(token, Duration::from_millis(50));
    let start = Instant::now();
    let err = dev.in_data_exchange(1, &[0x30, 0x04]).unwrap_err();
    canceller.join().unwrap();

    assert!(matches!(err, Error::Canceled), "got {err:?}");
    assert!(start.elapsed() < Duration::from_secs(1), "{:?}", start.elapsed());
    // cancellation is never retried
    assert_eq!(mock.call_count(cmd::IN_DATA_EXCHANGE), 1);
}
