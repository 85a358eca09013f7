use std::time::Duration;

use anyhow::{Result, bail};
use chrono::Utc;
use tokio::time::sleep;

use super::outcome::{BatchOutcome, MoveFailure};
use super::retry::{RetryPolicy, RetryScheduler};
use crate::api::Mover;
use crate::board::Card;

/// Fixed delay between consecutive cards of one batch.
pub const DEFAULT_THROTTLE_MS: u64 = 200;

/// Drives one bulk move: partition, sequential dispatch, throttling,
/// outcome accumulation.
///
/// Cards are moved strictly one at a time, in selection order — parallel
/// dispatch would race the backend's shared rate limit and muddy failure
/// attribution. One card's terminal failure never aborts the batch; only a
/// violated precondition makes `run` itself fail.
pub struct BatchExecutor {
    scheduler: RetryScheduler,
    throttle_ms: u64,
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new(RetryPolicy::default(), DEFAULT_THROTTLE_MS)
    }
}

impl BatchExecutor {
    pub fn new(policy: RetryPolicy, throttle_ms: u64) -> Self {
        Self {
            scheduler: RetryScheduler::new(policy),
            throttle_ms,
        }
    }

    /// Move every selected card to `target_status` through `mover`.
    ///
    /// Cards already in the target status are counted but never dispatched.
    /// The returned outcome is the whole story — clearing the selection on a
    /// clean outcome is the caller's follow-up, never done here.
    pub async fn run(
        &self,
        selected: &[Card],
        target_status: &str,
        mover: &impl Mover,
    ) -> Result<BatchOutcome> {
        if target_status.trim().is_empty() {
            bail!("Target status must not be empty");
        }

        let started_at = Utc::now();
        let (already, to_move): (Vec<&Card>, Vec<&Card>) = selected
            .iter()
            .partition(|card| card.status == target_status);

        let mut succeeded = 0;
        let mut failures = Vec::new();
        for (i, card) in to_move.iter().enumerate() {
            match self
                .scheduler
                .attempt_move(mover, &card.id, target_status)
                .await
            {
                Ok(()) => succeeded += 1,
                Err(err) => failures.push(MoveFailure {
                    card_id: card.id.clone(),
                    message: err.to_string(),
                }),
            }

            // Smooths request bursts against the backend's rate limiter;
            // not part of any single card's retry budget.
            if i + 1 < to_move.len() {
                sleep(Duration::from_millis(self.throttle_ms)).await;
            }
        }

        let completed_at = Utc::now();
        Ok(BatchOutcome {
            attempted: to_move.len(),
            already_satisfied: already.len(),
            succeeded,
            failures,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
        })
    }
}
