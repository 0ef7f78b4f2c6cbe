//! The preference-learning loop: analyze finished conversations, fold the
//! extracted insights into per-user preference records, track corrections,
//! feedback, and recurring questions, and periodically derive workspace-level
//! business context.
//!
//! Everything oracle-facing degrades to a no-op on model trouble; explicit
//! user signals (corrections, feedback) are applied unconditionally.

pub mod analyze;
pub mod business;
pub mod feedback;
pub mod preferences;
pub mod questions;

pub use analyze::analyze_conversation_for_learning;
pub use business::learn_business_context;
pub use feedback::record_message_feedback;
pub use preferences::{record_correction, update_user_preferences_from_insights};
pub use questions::track_frequent_question;
