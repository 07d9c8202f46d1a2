// libpn532-rs/libpn532/src/device/config.rs

use std::time::Duration;

use crate::transport::RetryConfig;
use crate::utils::default_timeout;
use crate::{Error, Result};

/// Per-device settings: command deadline and retry policy.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Deadline applied to each command attempt
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

/// One recognised configuration change. Options are applied in order,
/// so a later option overrides an earlier one.
#[derive(Debug, Clone, Copy)]
pub enum DeviceOption {
    /// Replace the whole retry policy
    RetryConfig(RetryConfig),
    /// Override `max_attempts`
    MaxRetries(u32),
    /// Override `initial_backoff`
    RetryBackoff(Duration),
    /// Default per-command timeout
    Timeout(Duration),
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::InvalidParameter("timeout must be > 0".into()));
        }
        self.retry.validate()
    }

    /// Apply `option`; the config is left untouched when the result would
    /// be invalid.
    pub fn apply(&mut self, option: DeviceOption) -> Result<()> {
        let mut next = *self;
        match option {
            DeviceOption::RetryConfig(retry) => next.retry = retry,
            DeviceOption::MaxRetries(n) => next.retry.max_attempts = n,
            DeviceOption::RetryBackoff(initial) => {
                next.retry.initial_backoff = initial;
                if next.retry.max_backoff < initial {
                    next.retry.max_backoff = initial;
                }
            }
            DeviceOption::Timeout(timeout) => next.timeout = timeout,
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn with_options<I>(mut self, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = DeviceOption>,
    {
        for option in options {
            self.apply(option)?;
        }
        Ok(self)
    }
}
