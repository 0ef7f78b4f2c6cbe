//! Hit-list topic lifecycle and priority-score types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a hit-list topic.
///
/// Topics move saved → `in_progress` → published. Score fields are mutated
/// only by the scoring engine; status and position only by user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    Saved,
    InProgress,
    Published,
}

impl TopicStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TopicStatus::Saved => "saved",
            TopicStatus::InProgress => "in_progress",
            TopicStatus::Published => "published",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "saved" => Some(TopicStatus::Saved),
            "in_progress" => Some(TopicStatus::InProgress),
            "published" => Some(TopicStatus::Published),
            _ => None,
        }
    }
}

/// Optional short rationale per scoring factor, as returned by the oracle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_gap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_potential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_coverage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_sentiment: Option<String>,
}

/// Six-factor priority score breakdown for one topic.
///
/// Sub-score ranges: `content_gap` [0,20], `trending` [0,20],
/// `engagement_potential` [0,20], `seasonality` [0,15],
/// `competitor_coverage` [0,15], `user_sentiment` [0,10]. Values are clamped
/// before construction; the total is always the sum of the stored sub-scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityScoreBreakdown {
    pub content_gap: i32,
    pub trending: i32,
    pub engagement_potential: i32,
    pub seasonality: i32,
    pub competitor_coverage: i32,
    pub user_sentiment: i32,
    pub scored_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<FactorNotes>,
}

impl PriorityScoreBreakdown {
    /// Total priority score: the sum of the six sub-scores, 0–100.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.content_gap
            + self.trending
            + self.engagement_potential
            + self.seasonality
            + self.competitor_coverage
            + self.user_sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_status_round_trips_as_str() {
        for status in [
            TopicStatus::Saved,
            TopicStatus::InProgress,
            TopicStatus::Published,
        ] {
            assert_eq!(TopicStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn topic_status_parse_rejects_unknown() {
        assert_eq!(TopicStatus::parse("archived"), None);
    }

    #[test]
    fn breakdown_total_is_sum_of_factors() {
        let breakdown = PriorityScoreBreakdown {
            content_gap: 15,
            trending: 12,
            engagement_potential: 18,
            seasonality: 7,
            competitor_coverage: 11,
            user_sentiment: 9,
            scored_at: Utc::now(),
            notes: None,
        };
        assert_eq!(breakdown.total(), 72);
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let breakdown = PriorityScoreBreakdown {
            content_gap: 10,
            trending: 10,
            engagement_potential: 10,
            seasonality: 7,
            competitor_coverage: 7,
            user_sentiment: 6,
            scored_at: Utc::now(),
            notes: None,
        };
        let value = serde_json::to_value(&breakdown).unwrap();
        assert!(value.get("contentGap").is_some());
        assert!(value.get("engagementPotential").is_some());
        assert!(value.get("notes").is_none());
    }
}
