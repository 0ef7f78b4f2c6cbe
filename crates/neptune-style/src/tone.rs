//! Deterministic post-generation tone adjustments.
//!
//! These run as a secondary pass after the model has produced a response.
//! Each pass is a plain string transformation, applied only when the profile
//! calls for it; text that matches nothing is returned unchanged.

use neptune_core::{CommunicationStyle, Formality, Tone, Verbosity};

/// Contractions inserted for casual users. Ordered longest-first so
/// overlapping phrases ("can not" / "cannot") resolve consistently.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("do not", "don't"),
    ("Do not", "Don't"),
    ("does not", "doesn't"),
    ("Does not", "Doesn't"),
    ("cannot", "can't"),
    ("Cannot", "Can't"),
    ("will not", "won't"),
    ("Will not", "Won't"),
    ("you are", "you're"),
    ("You are", "You're"),
    ("it is", "it's"),
    ("It is", "It's"),
    ("that is", "that's"),
    ("That is", "That's"),
    ("we are", "we're"),
    ("We are", "We're"),
    ("I am", "I'm"),
];

/// Hedges removed for direct-tone users.
const HEDGES: &[&str] = &[
    "I think ",
    "I believe ",
    "It seems like ",
    "It seems that ",
    "it seems like ",
    "it seems that ",
    "Perhaps ",
    "perhaps ",
    "Possibly ",
    "possibly ",
];

/// Emoji usage at or below this level means strip emoji from output.
const EMOJI_STRIP_AT_OR_BELOW: u8 = 10;

/// Adjust a generated response toward the user's style profile.
///
/// Best-effort and infallible: every pass either rewrites the text or leaves
/// it alone, and the function always returns usable text.
#[must_use]
pub fn adapt_response_tone(response: &str, style: &CommunicationStyle) -> String {
    let mut text = response.to_string();

    if style.formality == Formality::Casual {
        for (from, to) in CONTRACTIONS {
            text = text.replace(from, to);
        }
    }

    if style.tone == Tone::Direct {
        for hedge in HEDGES {
            text = text.replace(hedge, "");
        }
    }

    if style.emoji_usage <= EMOJI_STRIP_AT_OR_BELOW {
        text = strip_emoji(&text);
    }

    if style.verbosity == Verbosity::Concise {
        text = collapse_blank_runs(&text);
    }

    text
}

/// Remove emoji and variation selectors, keeping all other text intact.
fn strip_emoji(text: &str) -> String {
    text.chars().filter(|c| !is_emoji(*c)).collect()
}

fn is_emoji(c: char) -> bool {
    matches!(u32::from(c),
        0x1F300..=0x1FAFF // symbols, pictographs, supplemental pictographs
        | 0x2600..=0x27BF // miscellaneous symbols, dingbats
        | 0x1F1E6..=0x1F1FF // regional indicators
        | 0xFE0F // variation selector-16
        | 0x200D // zero-width joiner (only meaningful inside emoji sequences)
    )
}

/// Collapse runs of three or more newlines down to a single blank line.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(c);
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }
    out
}
