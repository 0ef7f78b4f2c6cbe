//! Client for the completion oracle (the external LLM service).
//!
//! The rest of the workspace talks to the oracle only through the
//! [`CompletionClient`] trait, so scoring and learning logic can be exercised
//! with deterministic stub clients. The production implementation is
//! [`OracleClient`], an OpenAI-compatible chat-completions HTTP client with
//! retry on transient failures.
//!
//! The oracle is assumed to routinely return syntactically invalid JSON, omit
//! requested fields, or fail outright; [`json::extract_json`] and
//! [`structured::structured_response`] exist so call sites can treat all three
//! as ordinary, recoverable conditions.

pub mod client;
pub mod error;
pub mod http;
pub mod json;
mod retry;
pub mod structured;

pub use client::{CompletionClient, CompletionRequest};
pub use error::OracleError;
pub use http::{OracleClient, OracleConfig};
pub use json::extract_json;
pub use structured::structured_response;
