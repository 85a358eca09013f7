mod batch;
mod classify;
mod outcome;
mod retry;
mod selection;

pub use batch::{BatchExecutor, DEFAULT_THROTTLE_MS};
pub use classify::{ErrorInfo, classify};
pub use outcome::{BatchOutcome, MAX_LISTED_FAILURES, MoveFailure, Summary, summarize};
pub use retry::{MoveError, RetryPolicy, RetryScheduler};
pub use selection::SelectionSet;
