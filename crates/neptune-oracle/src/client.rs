//! The injectable oracle boundary.

use async_trait::async_trait;

use crate::error::OracleError;

/// One completion request: a system prompt, a user prompt, and sampling knobs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the oracle to emit a single JSON object (`response_format: json_object`).
    pub json_mode: bool,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.7,
            max_tokens: 2048,
            json_mode: false,
        }
    }

    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A completion oracle.
///
/// Implementations must treat the underlying model as unreliable: callers are
/// written assuming `complete` can fail outright, and that even an `Ok` body
/// may be syntactically invalid JSON or missing requested fields. Construct
/// one client at process start and pass it by reference; there is no global
/// singleton.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] on transport failure, an API-level error
    /// envelope, or an empty choice list.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, OracleError>;
}
