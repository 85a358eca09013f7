use chrono::{DateTime, Utc};
use serde::Serialize;

/// How many failures the summary lists before truncating.
pub const MAX_LISTED_FAILURES: usize = 5;

/// One card's terminal failure inside a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MoveFailure {
    pub card_id: String,
    pub message: String,
}

/// The aggregate, auditable result of one bulk-move batch.
///
/// Built incrementally by the executor, finalized once, then handed to the
/// caller. `failures` preserves dispatch order so failure indices in the
/// summary are stable.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub already_satisfied: usize,
    pub succeeded: usize,
    pub failures: Vec<MoveFailure>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl BatchOutcome {
    /// Whether the batch finished without a single per-card failure.
    /// Only a clean batch makes the selection eligible for clearing.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The operator-facing verdict for a batch.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub ok: bool,
    pub message: String,
}

/// Collapse a [`BatchOutcome`] into a single ok/message pair.
///
/// Failures are listed numbered, truncated at [`MAX_LISTED_FAILURES`] with
/// an ellipsis marker — detailed enough to act on, bounded to avoid
/// overwhelming output.
pub fn summarize(outcome: &BatchOutcome) -> Summary {
    let already_note = if outcome.already_satisfied > 0 {
        format!(" ({} already in place)", outcome.already_satisfied)
    } else {
        String::new()
    };

    if outcome.is_clean() {
        return Summary {
            ok: true,
            message: format!("Moved {} cards{already_note}", outcome.succeeded),
        };
    }

    let mut message = format!(
        "Moved {}/{} cards{already_note}:",
        outcome.succeeded, outcome.attempted
    );
    for (i, failure) in outcome.failures.iter().take(MAX_LISTED_FAILURES).enumerate() {
        message.push_str(&format!(
            "\n  #{} ({}) → {}",
            i + 1,
            failure.card_id,
            failure.message
        ));
    }
    if outcome.failures.len() > MAX_LISTED_FAILURES {
        message.push_str(&format!(
            "\n  … and {} more",
            outcome.failures.len() - MAX_LISTED_FAILURES
        ));
    }

    Summary { ok: false, message }
}
