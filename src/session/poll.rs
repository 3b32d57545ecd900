use std::time::Duration;

use crate::config::env_u64;
use crate::Result;

/// Backoff for continuing a pending products query.
///
/// Delays grow as `initial_delay * 2^n` with the number of consecutive 202s and
/// are capped at `max_delay`. A server `Retry-After` replaces the computed delay
/// (still capped). `max_attempts` bounds the total continue calls of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
    pub honor_retry_after: bool,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(5000),
            max_attempts: 120,
            honor_retry_after: true,
        }
    }
}

impl PollPolicy {
    /// Defaults overridden by `GENDEV_POLL_INITIAL_DELAY_MS`,
    /// `GENDEV_POLL_MAX_DELAY_MS` and `GENDEV_POLL_MAX_ATTEMPTS`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let initial_delay = env_u64("GENDEV_POLL_INITIAL_DELAY_MS", "poll_policy")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_delay);
        let max_delay = env_u64("GENDEV_POLL_MAX_DELAY_MS", "poll_policy")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_delay);
        let max_attempts = env_u64("GENDEV_POLL_MAX_ATTEMPTS", "poll_policy")?
            .map(|n| n.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(defaults.max_attempts);
        Ok(Self {
            initial_delay,
            max_delay: max_delay.max(initial_delay),
            max_attempts: max_attempts.max(1),
            honor_retry_after: true,
        })
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn honor_retry_after(mut self, honor: bool) -> Self {
        self.honor_retry_after = honor;
        self
    }

    /// Delay before the next continue after `pending_streak` consecutive 202s.
    pub fn delay_for(&self, pending_streak: u32, retry_after: Option<Duration>) -> Duration {
        if self.honor_retry_after {
            if let Some(hint) = retry_after {
                return hint.min(self.max_delay);
            }
        }
        let base = self.initial_delay.as_millis() as u64;
        let cap = self.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(pending_streak.min(32)).unwrap_or(u64::MAX);
        Duration::from_millis(base.saturating_mul(factor).min(cap))
    }
}

/// `Retry-After` in delta-seconds form. HTTP dates are not supported.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
