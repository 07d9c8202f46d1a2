//! Cancellation primitives.
//!
//! Every blocking operation in the crate (transport reads, polling sleeps,
//! retry backoffs) observes a [`CommandContext`]: an optional deadline plus
//! an optional [`CancellationToken`] that another thread may trip.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::utils::timeout::{CANCEL_TICK_MS, ms};
use crate::{Error, Result};

/// Inter-thread abort flag. Clone it to hand it to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the token to canceled. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

/// Deadline and abort token for one operation.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    deadline: Option<Instant>,
    token: Option<CancellationToken>,
}

impl CommandContext {
    /// No deadline, no token.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            token: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn token(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn maybe_token(mut self, token: Option<CancellationToken>) -> Self {
        self.token = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    pub fn is_canceled(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_canceled())
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Canceled` wins over `Timeout` when both apply.
    pub fn check(&self) -> Result<()> {
        if self.is_canceled() {
            return Err(Error::Canceled);
        }
        if self.is_expired() {
            return Err(Error::Timeout);
        }
        Ok(())
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// A child context for a single attempt: same token, deadline capped at
    /// `now + budget`.
    pub fn child(&self, budget: Duration) -> Self {
        let candidate = Instant::now() + budget;
        let deadline = match self.deadline {
            Some(d) if d < candidate => d,
            _ => candidate,
        };
        Self {
            deadline: Some(deadline),
            token: self.token.clone(),
        }
    }

    /// Sleep for `duration`, waking every tick to look at the token. Ends
    /// early with `Canceled`. Sleeping past the deadline is clipped and the
    /// call then reports `Timeout`.
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        let wake_at = Instant::now() + duration;
        let (wake_at, clipped) = match self.deadline {
            Some(d) if d < wake_at => (d, true),
            _ => (wake_at, false),
        };

        loop {
            if self.is_canceled() {
                return Err(Error::Canceled);
            }
            let now = Instant::now();
            if now >= wake_at {
                break;
            }
            thread::sleep((wake_at - now).min(ms(CANCEL_TICK_MS)));
        }

        if clipped {
            return Err(Error::Timeout);
        }
        Ok(())
    }
}
