//! Retry policy for transactional write conflicts.
//!
//! Conflicts on the cached account balance (optimistic version check) roll
//! the whole transaction back; the policy decides how many times to try
//! again and how long to back off between attempts. Exhaustion surfaces as
//! `ConcurrencyConflict`, never as a partial write.

use std::future::Future;
use std::time::Duration;

use bahi_core::ledger::LedgerError;

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per attempt after that.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff delay after the given (1-based) failed attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(8);
        self.base_delay * 2u32.saturating_pow(exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(25))
    }
}

/// Runs a transactional operation under the policy.
///
/// Only retryable errors (see [`LedgerError::is_retryable`]) trigger
/// another attempt; everything else surfaces immediately.
pub(crate) async fn run_with_retry<F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut op: F,
) -> Result<(), LedgerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), LedgerError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                tracing::warn!(operation, attempt, "write conflict, retrying after backoff");
                tokio::time::sleep(policy.delay_for(attempt)).await;
            }
            Err(err) => {
                if err.is_retryable() {
                    tracing::error!(operation, attempt, "write conflict, retries exhausted");
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let policy = RetryPolicy::new(5, Duration::from_millis(25));

        assert_eq!(policy.delay_for(1), Duration::from_millis(25));
        assert_eq!(policy.delay_for(2), Duration::from_millis(50));
        assert_eq!(policy.delay_for(3), Duration::from_millis(100));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::new(100, Duration::from_millis(25));
        assert_eq!(policy.delay_for(9), policy.delay_for(50));
    }

    #[tokio::test]
    async fn test_retries_conflicts_then_succeeds() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = Cell::new(0);

        let result = run_with_retry(&policy, "test", || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move {
                if attempt < 3 {
                    Err(LedgerError::ConcurrencyConflict)
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_conflict() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let calls = Cell::new(0);

        let result = run_with_retry(&policy, "test", || {
            calls.set(calls.get() + 1);
            async { Err(LedgerError::ConcurrencyConflict) }
        })
        .await;

        assert_eq!(result, Err(LedgerError::ConcurrencyConflict));
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_errors_fail_fast() {
        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let calls = Cell::new(0);

        let result = run_with_retry(&policy, "test", || {
            calls.set(calls.get() + 1);
            async { Err(LedgerError::Storage("disk on fire".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert_eq!(calls.get(), 1);
    }
}
