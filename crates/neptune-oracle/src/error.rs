use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("oracle API error: {0}")]
    ApiError(String),

    #[error("failed to deserialize oracle response ({context}): {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("oracle returned no content")]
    EmptyResponse,
}
