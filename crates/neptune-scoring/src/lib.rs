//! Content-prioritization: the scoring engine, hit-list insights, and the
//! batch reprioritization pipeline.
//!
//! Scoring is best-effort by contract: every public entry point returns a
//! usable result even when the oracle misbehaves, degrading to a fixed
//! deterministic fallback score instead of surfacing an error.

pub mod engine;
pub mod hit_list;
pub mod insights;

pub use engine::{
    calculate_priority_scores, ScoredTopic, ScoringContext, TopicCandidate, FALLBACK_TOTAL,
};
pub use hit_list::{reprioritize, ReprioritizeOutcome};
pub use insights::{what_to_write_next, NextUpReport, TopicSummary};
