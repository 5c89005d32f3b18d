use std::time::Duration;

use backoff::backoff::Backoff;

/// Linear retry schedule bounded by a total attempt count.
///
/// With `max_attempts = 3` and `base = 1s` the schedule yields `1s`, `2s`,
/// then `None`: the wait before attempt `k` is `base * (k - 1)`.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base: Duration,
    max_attempts: u32,
    failed_attempts: u32,
}

impl LinearBackoff {
    pub fn new(base: Duration, max_attempts: u32) -> Self {
        Self {
            base,
            max_attempts,
            failed_attempts: 0,
        }
    }

    /// Attempts that have failed so far.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}

impl Backoff for LinearBackoff {
    fn reset(&mut self) {
        self.failed_attempts = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.failed_attempts = self.failed_attempts.saturating_add(1);

        if self.failed_attempts >= self.max_attempts {
            return None;
        }

        Some(self.base.saturating_mul(self.failed_attempts))
    }
}
