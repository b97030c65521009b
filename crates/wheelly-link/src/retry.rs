//! `RetryPolicy` — hook governing whether a failed link write is retried.
//!
//! Spec default: transient link errors are retried up to three times per
//! command within the reaction interval; persistent failures are surfaced so
//! the controller can move the link to `Failed`.

use crate::LinkError;

/// Decides whether a failed command send should be retried.
pub trait RetryPolicy: Send + Sync {
    /// `attempt` is 1 for the first retry after the initial failed send.
    fn should_retry(&self, attempt: u32, error: &LinkError) -> bool;
}

/// Retries up to `max` times, only for transient ([`LinkError::Timeout`])
/// failures — `TransportClosed` and `Protocol` are never retried, since
/// retrying a malformed payload just produces the same malformed payload.
pub struct FixedRetries {
    pub max: u32,
}

impl RetryPolicy for FixedRetries {
    fn should_retry(&self, attempt: u32, error: &LinkError) -> bool {
        matches!(error, LinkError::Timeout) && attempt <= self.max
    }
}

impl Default for FixedRetries {
    fn default() -> Self {
        Self { max: 3 }
    }
}

/// Never retries — useful for tests that want to observe the first failure
/// directly.
pub struct NoRetries;

impl RetryPolicy for NoRetries {
    fn should_retry(&self, _attempt: u32, _error: &LinkError) -> bool {
        false
    }
}
