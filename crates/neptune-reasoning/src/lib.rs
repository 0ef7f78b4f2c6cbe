//! Question complexity gating and structured step-by-step reasoning.
//!
//! The complexity gate is a cheap deterministic heuristic that decides
//! whether a question deserves a second, slower reasoning pass. The reasoning
//! pass itself is one low-temperature oracle call whose free-text answer is
//! decomposed into discrete steps by a tolerant rule-based parser.

mod complexity;
mod reasoning;

pub use complexity::is_complex_question;
pub use reasoning::{perform_reasoning, Confidence, ReasoningOutcome};
