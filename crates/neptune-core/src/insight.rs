//! Ephemeral learning insights extracted from finished conversations.
//!
//! Insights are never persisted directly; only their effect on the user
//! preference record is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Preference,
    Topic,
    Correction,
    Pattern,
}

/// One discrete fact learned from a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub key: String,
    pub value: String,
    /// Oracle-reported confidence in [0, 1].
    pub confidence: f64,
}

/// An explicit user correction: "you said X, actually Y".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub wrong: String,
    pub correct: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insight_deserializes_with_type_tag() {
        let raw = r#"{"type": "preference", "key": "communication_style", "value": "keep it brief", "confidence": 0.85}"#;
        let insight: LearningInsight = serde_json::from_str(raw).unwrap();
        assert_eq!(insight.kind, InsightKind::Preference);
        assert_eq!(insight.key, "communication_style");
        assert!((insight.confidence - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn correction_round_trips() {
        let correction = Correction {
            wrong: "our churn is 5%".to_string(),
            correct: "our churn is 3.2%".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&correction).unwrap();
        let back: Correction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wrong, correction.wrong);
        assert_eq!(back.correct, correction.correct);
    }
}
