//! Retry policy for transient failures.

use std::time::Duration;

use walmart_core::MarketplaceError;

/// Statuses worth another attempt.
const RETRYABLE_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Bounded retries with exponential backoff.
///
/// Network errors and `500`/`502`/`503`/`504` are retried up to
/// `max_retries` times; the delay before retry `n` (zero-based) is
/// `base_delay * 2^n`, capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Default backoff with `max_retries` retries.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::with_max_retries(0)
    }

    /// Whether a response with `status` should be retried.
    #[must_use]
    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Whether `err` should be retried.
    #[must_use]
    pub fn is_retryable_error(err: &MarketplaceError) -> bool {
        matches!(err, MarketplaceError::Network(_))
    }

    /// Whether another attempt is allowed after `attempt` retries.
    #[must_use]
    pub fn allows(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
