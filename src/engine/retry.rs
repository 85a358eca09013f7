use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use super::classify::classify;
use crate::api::Mover;

/// Retry behavior for a single logical move.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts (initial call included) before giving up on a card.
    pub max_attempts: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 400,
        }
    }
}

impl RetryPolicy {
    /// Backoff before re-attempting after a rate-limited failure.
    ///
    /// A server-provided hint wins, clamped to [`max_backoff_ms`](Self::max_backoff_ms)
    /// so a misbehaving `retry-after` cannot stall a move indefinitely.
    /// Without a hint: `base_delay_ms * 2^attempt` (attempt is 0-based).
    pub fn backoff_for_attempt(&self, attempt: u32, retry_after_ms: Option<u64>) -> u64 {
        match retry_after_ms {
            Some(hint) => hint.min(self.max_backoff_ms()),
            None => self.base_delay_ms * 2u64.pow(attempt),
        }
    }

    /// The largest exponential step this policy can produce.
    pub fn max_backoff_ms(&self) -> u64 {
        self.base_delay_ms * 2u64.pow(self.max_attempts.saturating_sub(1))
    }
}

/// Terminal failure of one card's move, after the retry policy is spent.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The backend rejected the transition as a business rule, not a
    /// transport problem. Never retried.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Every attempt came back rate-limited.
    #[error("Still rate limited after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },

    /// Any other terminal failure, carrying the best available message.
    #[error("{0}")]
    Other(String),
}

/// Executes one logical move with bounded exponential backoff.
///
/// Rate-limited failures (HTTP 429 or a rate-limit message) are retried up
/// to the policy's attempt budget, honoring the server's retry hint when one
/// was provided. Everything else fails fast. This is the only component that
/// suspends inside a single move; it never runs concurrently with itself for
/// the same card.
pub struct RetryScheduler {
    policy: RetryPolicy,
}

impl RetryScheduler {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub async fn attempt_move(
        &self,
        mover: &impl Mover,
        card_id: &str,
        target_status: &str,
    ) -> Result<(), MoveError> {
        for attempt in 0..self.policy.max_attempts {
            let err = match mover.move_status(card_id, target_status).await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            let info = classify(&err);
            if info.is_rate_limited() {
                let delay_ms = self.policy.backoff_for_attempt(attempt, info.retry_after_ms);
                log_retry(attempt + 1, self.policy.max_attempts, delay_ms);
                sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }
            if info.is_invalid_transition() {
                return Err(MoveError::InvalidTransition(info.message));
            }
            return Err(MoveError::Other(info.message));
        }

        Err(MoveError::RateLimitExhausted {
            attempts: self.policy.max_attempts,
        })
    }
}

fn log_retry(attempt: u32, max: u32, delay_ms: u64) {
    eprintln!("  ↻ Retry {attempt}/{max}: rate limited (waiting {delay_ms}ms)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Mover};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedMover {
        responses: Mutex<VecDeque<Result<(), ApiError>>>,
        calls: AtomicU32,
    }

    impl ScriptedMover {
        fn new(responses: Vec<Result<(), ApiError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Mover for ScriptedMover {
        async fn move_status(&self, _card_id: &str, _target: &str) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()))
        }
    }

    fn rate_limited(hint: Option<u64>) -> ApiError {
        ApiError::RateLimited {
            retry_after_ms: hint,
        }
    }

    fn api_error(status: u16, body: &str) -> ApiError {
        ApiError::Api {
            status,
            body: serde_json::from_str(body).unwrap(),
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
        }
    }

    #[test]
    fn default_backoff_sequence() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..5).map(|a| policy.backoff_for_attempt(a, None)).collect();
        assert_eq!(delays, vec![400, 800, 1600, 3200, 6400]);
    }

    #[test]
    fn retry_hint_overrides_exponential() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for_attempt(0, Some(2000)), 2000);
        assert_eq!(policy.backoff_for_attempt(3, Some(100)), 100);
    }

    #[test]
    fn oversized_hint_is_clamped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_backoff_ms(), 6400);
        assert_eq!(policy.backoff_for_attempt(0, Some(60_000)), 6400);
    }

    #[tokio::test]
    async fn succeeds_on_first_attempt() {
        let mover = ScriptedMover::new(vec![Ok(())]);
        let scheduler = RetryScheduler::new(fast_policy(5));

        scheduler.attempt_move(&mover, "c1", "done").await.unwrap();
        assert_eq!(mover.calls(), 1);
    }

    #[tokio::test]
    async fn retries_once_on_rate_limit_then_succeeds() {
        let mover = ScriptedMover::new(vec![Err(rate_limited(Some(1))), Ok(())]);
        let scheduler = RetryScheduler::new(fast_policy(5));

        scheduler.attempt_move(&mover, "c1", "done").await.unwrap();
        assert_eq!(mover.calls(), 2);
    }

    #[tokio::test]
    async fn rate_limit_message_without_429_is_retried() {
        let mover = ScriptedMover::new(vec![
            Err(api_error(503, r#"{"message": "Rate limit exceeded"}"#)),
            Ok(()),
        ]);
        let scheduler = RetryScheduler::new(fast_policy(5));

        scheduler.attempt_move(&mover, "c1", "done").await.unwrap();
        assert_eq!(mover.calls(), 2);
    }

    #[tokio::test]
    async fn invalid_transition_fails_without_retry() {
        let mover = ScriptedMover::new(vec![Err(api_error(
            400,
            r#"{"errors": [{"code": "invalid_transition", "detail": "Cannot move from done to pending"}]}"#,
        ))]);
        let scheduler = RetryScheduler::new(fast_policy(5));

        let err = scheduler.attempt_move(&mover, "c1", "pending").await.unwrap_err();
        assert_eq!(mover.calls(), 1);
        assert!(matches!(err, MoveError::InvalidTransition(_)));
        assert_eq!(
            err.to_string(),
            "Invalid transition: Cannot move from done to pending"
        );
    }

    #[tokio::test]
    async fn generic_error_fails_without_retry() {
        let mover = ScriptedMover::new(vec![Err(api_error(
            500,
            r#"{"message": "Database unavailable"}"#,
        ))]);
        let scheduler = RetryScheduler::new(fast_policy(5));

        let err = scheduler.attempt_move(&mover, "c1", "done").await.unwrap_err();
        assert_eq!(mover.calls(), 1);
        assert!(matches!(err, MoveError::Other(_)));
        assert_eq!(err.to_string(), "Database unavailable");
    }

    #[tokio::test]
    async fn exhausts_attempts_on_persistent_rate_limit() {
        let mover = ScriptedMover::new(vec![
            Err(rate_limited(None)),
            Err(rate_limited(None)),
            Err(rate_limited(None)),
        ]);
        let scheduler = RetryScheduler::new(fast_policy(3));

        let err = scheduler.attempt_move(&mover, "c1", "done").await.unwrap_err();
        assert_eq!(mover.calls(), 3);
        assert!(matches!(err, MoveError::RateLimitExhausted { attempts: 3 }));
        assert_eq!(err.to_string(), "Still rate limited after 3 attempts");
    }
}
