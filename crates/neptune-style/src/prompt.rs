//! System-prompt instruction blocks derived from a style profile.

use neptune_core::{
    CommunicationStyle, Formality, ResponsePattern, Tone, Verbosity, STYLE_CONFIDENCE_FLOOR,
};

/// Banding thresholds for the two 0–100 scalars.
const EMOJI_OCCASIONAL_OVER: u8 = 30;
const EMOJI_SPARING_OVER: u8 = 10;
const TECH_HIGH_OVER: u8 = 60;
const TECH_MODERATE_OVER: u8 = 30;

/// Map a style profile to an instruction block for the assistant's system
/// prompt.
///
/// Returns the empty string when `confidence` is below
/// [`STYLE_CONFIDENCE_FLOOR`]: weak signal means no adaptation at all.
/// Otherwise each of the six dimensions contributes one independent
/// instruction line.
#[must_use]
pub fn generate_style_prompt(style: &CommunicationStyle) -> String {
    if style.confidence < STYLE_CONFIDENCE_FLOOR {
        return String::new();
    }

    let mut lines = vec!["Adapt your communication style to this user:".to_string()];

    lines.push(match style.formality {
        Formality::Casual => {
            "- Keep the tone casual and conversational. Contractions are fine.".to_string()
        }
        Formality::Professional => "- Maintain a professional, polished tone.".to_string(),
        Formality::Technical => {
            "- Use precise technical language and assume familiarity with industry terms."
                .to_string()
        }
    });

    lines.push(match style.verbosity {
        Verbosity::Concise => {
            "- Keep responses short and to the point. Lead with the answer.".to_string()
        }
        Verbosity::Balanced => {
            "- Balance brevity with enough detail to be actionable.".to_string()
        }
        Verbosity::Detailed => {
            "- Provide thorough responses with supporting context.".to_string()
        }
    });

    lines.push(match style.tone {
        Tone::Friendly => "- Be warm and encouraging.".to_string(),
        Tone::Neutral => "- Keep an even, neutral tone.".to_string(),
        Tone::Direct => "- Be direct. Skip pleasantries and state conclusions first.".to_string(),
    });

    lines.push(if style.emoji_usage > EMOJI_OCCASIONAL_OVER {
        "- Use emoji occasionally where they add warmth.".to_string()
    } else if style.emoji_usage > EMOJI_SPARING_OVER {
        "- Use emoji sparingly.".to_string()
    } else {
        "- Avoid emoji.".to_string()
    });

    lines.push(if style.technical_level > TECH_HIGH_OVER {
        "- The user is highly technical. Do not oversimplify.".to_string()
    } else if style.technical_level > TECH_MODERATE_OVER {
        "- Explain moderately technical concepts briefly as you go.".to_string()
    } else {
        "- Avoid jargon. Explain concepts in plain language.".to_string()
    });

    lines.push(match style.response_pattern {
        ResponsePattern::QuickWins => {
            "- Lead with quick wins and immediately actionable steps.".to_string()
        }
        ResponsePattern::ThoroughAnalysis => {
            "- Walk through the analysis before giving the conclusion.".to_string()
        }
        ResponsePattern::Exploratory => {
            "- Offer options and trade-offs rather than a single prescriptive answer.".to_string()
        }
    });

    if let Some(greeting) = &style.preferred_greeting {
        lines.push(format!("- When greeting the user, prefer \"{greeting}\"."));
    }

    lines.join("\n")
}
