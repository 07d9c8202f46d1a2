// libpn532-rs/libpn532/src/detect/options.rs

use std::time::{Duration, Instant};

use crate::types::{BaudRate, TagType};
use crate::utils::{MAX_POLLING_PERIOD_MS, MIN_POLLING_PERIOD_MS, default_polling_period, ms};
use crate::{Error, Result};

/// What `wait_for_tag` waits for and for how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Relative limit, measured from the start of the wait
    pub timeout: Option<Duration>,
    /// Absolute limit; wins over `timeout` when both are set
    pub deadline: Option<Instant>,
    /// Pause between polls, within [10 ms, 10 s]
    pub polling_period: Duration,
    /// `None` accepts every tag type
    pub tag_type: Option<TagType>,
    /// `None` accepts every UID
    pub uid: Option<Vec<u8>>,
    pub baud_rate: BaudRate,
    /// Targets per poll, 1 or 2
    pub max_tags: u8,
    /// Send GET_VERSION to NTAG-looking tags to tell Ultralight apart
    pub probe_ultralight: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            deadline: None,
            polling_period: default_polling_period(),
            tag_type: None,
            uid: None,
            baud_rate: BaudRate::TypeA106,
            max_tags: 1,
            probe_ultralight: false,
        }
    }
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_polling_period(mut self, period: Duration) -> Self {
        self.polling_period = period;
        self
    }

    pub fn with_tag_type(mut self, tag_type: TagType) -> Self {
        self.tag_type = Some(tag_type);
        self
    }

    pub fn with_uid(mut self, uid: impl Into<Vec<u8>>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: BaudRate) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_max_tags(mut self, max_tags: u8) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn with_probe_ultralight(mut self, probe: bool) -> Self {
        self.probe_ultralight = probe;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let period = self.polling_period;
        if period < ms(MIN_POLLING_PERIOD_MS) || period > ms(MAX_POLLING_PERIOD_MS) {
            return Err(Error::InvalidParameter(format!(
                "polling period {period:?} outside [{MIN_POLLING_PERIOD_MS} ms, {MAX_POLLING_PERIOD_MS} ms]"
            )));
        }
        validate_max_tags(self.max_tags)
    }

    /// Absolute deadline for a wait starting at `start`, `None` when the
    /// wait is unbounded.
    pub fn resolve_deadline(&self, start: Instant) -> Option<Instant> {
        self.deadline.or_else(|| self.timeout.map(|t| start + t))
    }
}

pub(crate) fn validate_max_tags(max_tags: u8) -> Result<()> {
    if !(1..=2).contains(&max_tags) {
        return Err(Error::InvalidParameter(format!(
            "max_tags must be 1 or 2, got {max_tags}"
        )));
    }
    Ok(())
}
