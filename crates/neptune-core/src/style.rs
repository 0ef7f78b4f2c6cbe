//! Communication-style profile types.
//!
//! A [`CommunicationStyle`] is produced by the conversation-analysis layer from
//! a user's observed message history and consumed read-only by the style
//! prompt generator. The profile carries a 0–100 confidence scalar; below
//! [`STYLE_CONFIDENCE_FLOOR`] the signal is considered too weak to adapt on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum style confidence (0–100) required before any adaptation is applied.
pub const STYLE_CONFIDENCE_FLOOR: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Casual,
    Professional,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    Balanced,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Friendly,
    Neutral,
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsePattern {
    QuickWins,
    ThoroughAnalysis,
    Exploratory,
}

/// A user's inferred communication style within one workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStyle {
    pub formality: Formality,
    pub verbosity: Verbosity,
    pub tone: Tone,
    /// How often the user reaches for emoji, 0–100.
    pub emoji_usage: u8,
    /// How technical the user's own language is, 0–100.
    pub technical_level: u8,
    pub response_pattern: ResponsePattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_greeting: Option<String>,
    /// How much observed history supports this classification, 0–100.
    pub confidence: u8,
    pub last_updated: DateTime<Utc>,
}

/// Coarse response-length preference stored on the user preference record.
///
/// Distinct from the richer [`CommunicationStyle`] profile: this is the single
/// learned concise/detailed switch, not the full style classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredStyle {
    Concise,
    Detailed,
}

impl PreferredStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredStyle::Concise => "concise",
            PreferredStyle::Detailed => "detailed",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "concise" => Some(PreferredStyle::Concise),
            "detailed" => Some(PreferredStyle::Detailed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_pattern_serializes_kebab_case() {
        let json = serde_json::to_string(&ResponsePattern::QuickWins).unwrap();
        assert_eq!(json, "\"quick-wins\"");
    }

    #[test]
    fn communication_style_round_trips_camel_case() {
        let raw = r#"{
            "formality": "casual",
            "verbosity": "concise",
            "tone": "friendly",
            "emojiUsage": 40,
            "technicalLevel": 20,
            "responsePattern": "thorough-analysis",
            "confidence": 75,
            "lastUpdated": "2026-01-15T00:00:00Z"
        }"#;
        let style: CommunicationStyle = serde_json::from_str(raw).unwrap();
        assert_eq!(style.formality, Formality::Casual);
        assert_eq!(style.response_pattern, ResponsePattern::ThoroughAnalysis);
        assert_eq!(style.emoji_usage, 40);
        assert!(style.preferred_greeting.is_none());
    }

    #[test]
    fn preferred_style_parse_rejects_unknown() {
        assert_eq!(PreferredStyle::parse("concise"), Some(PreferredStyle::Concise));
        assert_eq!(PreferredStyle::parse("verbose"), None);
    }
}
