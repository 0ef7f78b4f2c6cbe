//! HTTP implementation of [`CompletionClient`] for OpenAI-compatible
//! chat-completions endpoints.
//!
//! Wraps `reqwest` with oracle-specific error handling, bearer-token auth,
//! and typed response deserialization. Transient failures (timeouts, connect
//! errors, 5xx) are retried with exponential back-off before the error is
//! surfaced to callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::client::{CompletionClient, CompletionRequest};
use crate::error::OracleError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for [`OracleClient`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
            max_retries: 2,
            retry_backoff_base_ms: 1_000,
        }
    }
}

/// Production oracle client.
///
/// Use [`OracleClient::new`] for the real endpoint, or point
/// [`OracleConfig::base_url`] at a mock server in tests.
pub struct OracleClient {
    client: Client,
    api_key: String,
    config: OracleConfig,
}

impl OracleClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, config: OracleConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("neptune/0.1 (content-intelligence)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            config,
        })
    }

    /// One un-retried completion attempt.
    async fn complete_once(&self, request: &CompletionRequest) -> Result<String, OracleError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let text = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| OracleError::Deserialize {
                context: "chat/completions".to_string(),
                source: e,
            })?;
        Self::check_api_error(&value)?;

        let envelope: ChatCompletionResponse =
            serde_json::from_value(value).map_err(|e| OracleError::Deserialize {
                context: "chat/completions".to_string(),
                source: e,
            })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)?;

        Ok(content)
    }

    /// Some compatible endpoints return 200 with a top-level `"error"`
    /// envelope instead of a non-2xx status.
    fn check_api_error(body: &serde_json::Value) -> Result<(), OracleError> {
        if let Some(error) = body.get("error") {
            let msg = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(OracleError::ApiError(msg));
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionClient for OracleClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, OracleError> {
        retry_with_backoff(
            self.config.max_retries,
            self.config.retry_backoff_base_ms,
            || self.complete_once(request),
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
