//! Typed structured-output wrapper over a [`CompletionClient`].

use serde::de::DeserializeOwned;

use crate::client::{CompletionClient, CompletionRequest};
use crate::json::extract_json;

/// Run a JSON-mode completion and parse the response into `T`.
///
/// Returns `None` on any failure (transport error, empty content,
/// unextractable JSON, shape mismatch), so callers always have a defined
/// degraded path instead of an error to handle.
pub async fn structured_response<T: DeserializeOwned>(
    client: &dyn CompletionClient,
    request: CompletionRequest,
) -> Option<T> {
    let request = request.json();
    let text = match client.complete(&request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "structured completion failed");
            return None;
        }
    };

    let Some(value) = extract_json(&text) else {
        tracing::warn!("structured completion returned no parseable JSON");
        return None;
    };

    match serde_json::from_value::<T>(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(error = %e, "structured completion did not match expected shape");
            None
        }
    }
}
