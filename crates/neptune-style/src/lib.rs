//! Style adaptation: turn an inferred communication-style profile into
//! system-prompt instructions, and post-process generated text to better
//! match the profile.
//!
//! Both halves are pure and deterministic. Prompt generation refuses to adapt
//! on weak signal (confidence below `STYLE_CONFIDENCE_FLOOR` yields an empty
//! string); tone adaptation is best-effort and always returns usable text.

mod prompt;
mod tone;

pub use prompt::generate_style_prompt;
pub use tone::adapt_response_tone;
