use std::time::Duration;

use reqwest::Client;

use super::Mover;
use super::error::ApiError;
use super::types::{ErrorEnvelope, MoveStatusRequest};

pub struct BoardClient {
    token: String,
    client: Client,
    base_url: String,
}

impl BoardClient {
    /// Create a client pointing at the given backend base URL
    /// (e.g. `https://api.example.com/v1`).
    pub fn new(base_url: String, token: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            token,
            client,
            base_url,
        }
    }
}

impl Mover for BoardClient {
    async fn move_status(&self, card_id: &str, target_status: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/cards/{card_id}/status",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&MoveStatusRequest {
                status: target_status.to_string(),
            })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            return Err(ApiError::RateLimited {
                retry_after_ms: retry_after,
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Non-JSON bodies (proxies, plain-text 500s) become a
            // message-only envelope.
            let body = serde_json::from_str::<ErrorEnvelope>(&text).unwrap_or_else(|_| {
                if text.trim().is_empty() {
                    ErrorEnvelope::default()
                } else {
                    ErrorEnvelope::from_message(text)
                }
            });
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
