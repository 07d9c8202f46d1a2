// libpn532-rs/libpn532/src/transport/retry.rs

use std::time::{Duration, Instant};

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use log::{debug, warn};

use crate::transport::Transport;
use crate::types::TransportType;
use crate::utils::CommandContext;
use crate::{Error, Result};

/// Retry policy for one command exchange (send + ACK + response).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryConfig {
    /// Total attempts including the first one (>= 1)
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Growth factor per retry (>= 1.0)
    pub multiplier: f64,
    /// Randomization fraction in [0, 1]
    pub jitter: f64,
    /// Decides whether a failure is worth another attempt
    #[cfg_attr(feature = "serde", serde(skip, default = "default_classifier"))]
    pub classifier: fn(&Error) -> bool,
}

fn default_classifier() -> fn(&Error) -> bool {
    Error::is_transient
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(20),
            max_backoff: Duration::from_millis(500),
            multiplier: 2.0,
            jitter: 0.1,
            classifier: default_classifier(),
        }
    }
}

impl RetryConfig {
    /// Single attempt, no backoff.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidParameter("max_attempts must be >= 1".into()));
        }
        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(Error::InvalidParameter(format!(
                "backoff multiplier must be >= 1.0, got {}",
                self.multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(Error::InvalidParameter(format!(
                "jitter must be within [0, 1], got {}",
                self.jitter
            )));
        }
        if self.initial_backoff > self.max_backoff {
            return Err(Error::InvalidParameter(
                "initial_backoff exceeds max_backoff".into(),
            ));
        }
        Ok(())
    }

    /// Fresh backoff schedule for one retry loop.
    pub fn build_backoff(&self) -> ExponentialBackoff {
        let initial = self.initial_backoff;
        ExponentialBackoff {
            current_interval: initial,
            initial_interval: initial,
            max_interval: self.max_backoff.max(initial),
            randomization_factor: self.jitter.clamp(0.0, 1.0),
            multiplier: self.multiplier.max(1.0),
            // attempts bound the loop, not wall-clock time
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        }
    }
}

/// Transport wrapper that re-runs whole exchanges on transient failures.
///
/// Plain `Transport` calls pass straight through; retrying happens in
/// [`RetryingTransport::run`], which the device uses for every command.
pub struct RetryingTransport {
    inner: Box<dyn Transport>,
    config: RetryConfig,
}

impl RetryingTransport {
    pub fn new(inner: Box<dyn Transport>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RetryConfig) {
        self.config = config;
    }

    /// Run `op` until it succeeds, fails permanently, runs out of attempts
    /// or the backoff would cross the deadline of `ctx`. Each attempt gets a
    /// child context bounded by `attempt_timeout`.
    ///
    /// After the last attempt the last observed error is returned as-is.
    pub fn run<T, F>(&mut self, ctx: &CommandContext, attempt_timeout: Duration, mut op: F) -> Result<T>
    where
        F: FnMut(&mut dyn Transport, &CommandContext) -> Result<T>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut schedule = self.config.build_backoff();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            ctx.check()?;
            let attempt_ctx = ctx.child(attempt_timeout);

            let err = match op(&mut *self.inner, &attempt_ctx) {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("exchange succeeded on attempt {attempt}/{max_attempts}");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if matches!(err, Error::Canceled) || !(self.config.classifier)(&err) {
                return Err(err);
            }
            if attempt >= max_attempts {
                warn!("giving up after {attempt} attempts: {err}");
                return Err(err);
            }

            let delay = schedule
                .next_backoff()
                .unwrap_or(self.config.max_backoff);
            if let Some(deadline) = ctx.deadline() {
                if Instant::now() + delay >= deadline {
                    debug!("attempt {attempt} failed ({err}); no time left for a retry");
                    return Err(err);
                }
            }

            debug!("attempt {attempt}/{max_attempts} failed ({err}); retrying in {delay:?}");
            ctx.sleep(delay)?;
        }
    }
}

impl Transport for RetryingTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.inner.send(data)
    }

    fn receive(&mut self, deadline: Instant) -> Result<Vec<u8>> {
        self.inner.receive(deadline)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }

    fn transport_type(&self) -> TransportType {
        self.inner.transport_type()
    }

    fn wake_up(&mut self) -> Result<()> {
        self.inner.wake_up()
    }
}
