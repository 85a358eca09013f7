use serde::Serialize;

use crate::api::ApiError;

/// Normalized view of one failed move, extracted from whatever shape the
/// backend (or the network layer) produced. Constructed fresh per failure,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub detail: Option<String>,
    pub message: String,
    pub retry_after_ms: Option<u64>,
}

impl ErrorInfo {
    /// HTTP 429, or any message mentioning rate limiting — some backends
    /// report it through a 503 or a plain error body.
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(429) || self.message.to_lowercase().contains("rate limit")
    }

    /// HTTP 400 carrying the backend's invalid-transition rejection, by
    /// machine code or by message.
    pub fn is_invalid_transition(&self) -> bool {
        self.status == Some(400)
            && (self.code.as_deref() == Some("invalid_transition")
                || self.message.to_lowercase().contains("invalid transition"))
    }
}

/// Normalize a failed move into an [`ErrorInfo`].
///
/// Extraction order for API errors: `errors[0].{code,detail}` from the
/// envelope when present, else the envelope's top-level `code`/`message`.
/// The final message is the first non-empty of the extracted detail, the
/// error's own message, or `"Unknown error"`. Pure: no network or state
/// access, and always returns a populated record.
pub fn classify(err: &ApiError) -> ErrorInfo {
    match err {
        ApiError::RateLimited { retry_after_ms } => ErrorInfo {
            status: Some(429),
            code: None,
            detail: None,
            message: err.to_string(),
            retry_after_ms: *retry_after_ms,
        },
        ApiError::Api { status, body } => {
            let first = body.errors.first();
            let code = first
                .and_then(|e| e.code.clone())
                .or_else(|| body.code.clone());
            let detail = first
                .and_then(|e| e.detail.clone())
                .or_else(|| body.message.clone());
            let own_message = err.to_string();
            let message = [detail.as_deref(), Some(own_message.as_str())]
                .into_iter()
                .flatten()
                .find(|m| !m.trim().is_empty())
                .unwrap_or("Unknown error")
                .to_string();
            ErrorInfo {
                status: Some(*status),
                code,
                detail,
                message,
                retry_after_ms: None,
            }
        }
        ApiError::Network(e) => ErrorInfo {
            status: e.status().map(|s| s.as_u16()),
            code: None,
            detail: None,
            message: e.to_string(),
            retry_after_ms: None,
        },
    }
}
