#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::{Duration, Instant};

use libpn532::constants::cmd;
use libpn532::transport::RetryConfig;
use libpn532::{CancellationToken, Error, TagType, TransportErrorKind, WaitOptions};
use proptest::prelude::*;
use serial_test::serial;

#[test]
#[serial]
fn no_tag_until_deadline() {
    common::helpers::init_logging();
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::empty_list_data()).unwrap();

    let start = Instant::now();
    let opts = WaitOptions::new()
        .with_deadline(start + Duration::from_millis(300))
        .with_polling_period(Duration::from_millis(50));
    let err = dev.wait_for_tag(&opts).unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, Error::Timeout), "got {err:?}");
    assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(300 + 50 + 250), "{elapsed:?}");
    assert!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET) >= 5);
}

#[test]
#[serial]
fn simple_poll_finds_tag_on_first_poll() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    let tag = dev
        .simple_poll(Duration::from_millis(500), Duration::from_millis(20))
        .unwrap();
    assert_eq!(tag.tag_type(), TagType::Ntag);
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 1);
}

#[test]
#[serial]
fn filtered_out_tags_keep_the_loop_going() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::mifare1k_list_data())
            .unwrap();
    let opts = WaitOptions::new()
        .with_timeout(Duration::from_millis(150))
        .with_polling_period(Duration::from_millis(20))
        .with_tag_type(TagType::Ntag);

    assert!(matches!(dev.wait_for_tag(&opts), Err(Error::Timeout)));
    assert!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET) >= 2);
}

#[test]
#[serial]
fn uid_filter_picks_the_second_target() {
    let (_mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::two_tag_list_data())
            .unwrap();
    let opts = WaitOptions::new()
        .with_timeout(Duration::from_millis(300))
        .with_polling_period(Duration::from_millis(20))
        .with_max_tags(2)
        .with_uid(common::fixtures::MIFARE_UID.to_vec());

    let tag = dev.wait_for_tag(&opts).unwrap();
    assert_eq!(tag.tag_type(), TagType::Mifare1k);
    assert_eq!(tag.uid(), &common::fixtures::MIFARE_UID);
}

#[test]
#[serial]
fn cancel_from_another_thread() {
    let (_mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::empty_list_data()).unwrap();
    let token = CancellationToken::new();
    dev.set_cancellation_token(Some(token.clone()));

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(80));
        token.cancel();
    });

    let start = Instant::now();
    // no timeout: only the token can end this wait
    let err = dev
        .wait_for_tag(&WaitOptions::new().with_polling_period(Duration::from_millis(20)))
        .unwrap_err();
    canceller.join().unwrap();

    assert!(matches!(err, Error::Canceled));
    assert!(start.elapsed() < Duration::from_secs(2));
}

fn chip_errors_too(err: &Error) -> bool {
    matches!(err, Error::ChipError(_)) || err.is_transient()
}

fn nothing_is_transient(_: &Error) -> bool {
    false
}

#[test]
#[serial]
fn custom_classifier_keeps_polling_through_chip_errors() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    dev.set_retry_config(RetryConfig {
        classifier: chip_errors_too,
        ..RetryConfig::no_retry()
    })
    .unwrap();
    mock.fail_next_receives(cmd::IN_LIST_PASSIVE_TARGET, 1, Error::ChipError(0x27));

    let opts = WaitOptions::new()
        .with_timeout(Duration::from_millis(500))
        .with_polling_period(Duration::from_millis(20));
    let tag = dev.wait_for_tag(&opts).unwrap();
    assert_eq!(tag.tag_type(), TagType::Ntag);
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 2);
}

#[test]
#[serial]
fn custom_classifier_ends_wait_on_io_error() {
    let (mock, mut dev) =
        common::helpers::mock_device_with_targets(&common::fixtures::ntag_list_data()).unwrap();
    dev.set_retry_config(RetryConfig {
        classifier: nothing_is_transient,
        ..RetryConfig::default()
    })
    .unwrap();
    mock.fail_next_receives(
        cmd::IN_LIST_PASSIVE_TARGET,
        1,
        Error::transport(TransportErrorKind::Io, "uart overrun"),
    );

    let opts = WaitOptions::new()
        .with_timeout(Duration::from_millis(500))
        .with_polling_period(Duration::from_millis(20));
    let err = dev.wait_for_tag(&opts).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport {
            kind: TransportErrorKind::Io,
            ..
        }
    ));
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 1);
}

#[test]
fn invalid_polling_period_is_rejected() {
    let (mock, mut dev) = common::helpers::mock_device().unwrap();
    let opts = WaitOptions::new()
        .with_timeout(Duration::from_millis(100))
        .with_polling_period(Duration::from_millis(1));
    assert!(matches!(
        dev.wait_for_tag(&opts),
        Err(Error::InvalidParameter(_))
    ));
    assert_eq!(mock.call_count(cmd::IN_LIST_PASSIVE_TARGET), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn returned_tag_always_passes_the_filter(want_ntag in any::<bool>(), by_uid in any::<bool>()) {
        let (_mock, mut dev) =
            common::helpers::mock_device_with_targets(&common::fixtures::two_tag_list_data())
                .unwrap();
        let mut opts = WaitOptions::new()
            .with_timeout(Duration::from_millis(200))
            .with_polling_period(Duration::from_millis(10))
            .with_max_tags(2);
        if want_ntag {
            opts = opts.with_tag_type(TagType::Ntag);
        }
        if by_uid {
            opts = opts.with_uid(common::fixtures::MIFARE_UID.to_vec());
        }

        match dev.wait_for_tag(&opts) {
            Ok(tag) => prop_assert!(tag.matches(opts.tag_type, opts.uid.as_deref())),
            // NTAG with the MIFARE UID exists nowhere in the field
            Err(err) => {
                prop_assert!(want_ntag && by_uid);
                prop_assert!(matches!(err, Error::Timeout));
            }
        }
    }
}
