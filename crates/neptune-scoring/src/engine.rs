//! Multi-factor priority scoring via one consolidated oracle call.
//!
//! The whole candidate batch goes out in a single prompt; the response is a
//! JSON object mapping each topic id to six sub-scores. Sub-scores are
//! clamped to their declared ranges and the total is always recomputed as
//! their sum; the model's own arithmetic is never trusted. Topics the model
//! skips, and entire failed calls, degrade to [`fallback_breakdown`].

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::Utc;
use neptune_core::{FactorNotes, PriorityScoreBreakdown};
use neptune_oracle::{extract_json, CompletionClient, CompletionRequest};
use serde::Deserialize;

/// Upper bounds per factor. Lower bound is always 0.
const CONTENT_GAP_MAX: i32 = 20;
const TRENDING_MAX: i32 = 20;
const ENGAGEMENT_MAX: i32 = 20;
const SEASONALITY_MAX: i32 = 15;
const COMPETITOR_MAX: i32 = 15;
const SENTIMENT_MAX: i32 = 10;

/// Total of the fixed fallback breakdown.
pub const FALLBACK_TOTAL: i32 = 50;

/// One topic to score.
#[derive(Debug, Clone)]
pub struct TopicCandidate {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub why_it_works: String,
    pub category: String,
}

/// Workspace context the oracle weighs the batch against.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    /// Display lines for already-published content ("title (category)").
    pub existing_content: Vec<String>,
    /// Titles of topics already sitting in the queue.
    pub recent_topics: Vec<String>,
    pub industry_context: Option<String>,
}

/// A scored topic: recomputed total plus the clamped breakdown.
#[derive(Debug, Clone)]
pub struct ScoredTopic {
    pub topic_id: i64,
    pub total: i32,
    pub breakdown: PriorityScoreBreakdown,
}

/// One per-topic entry in the oracle's response. All six factors are
/// required; entries that do not deserialize are treated as missing and the
/// topic falls back.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreEntry {
    topic_id: i64,
    content_gap: f64,
    trending: f64,
    engagement_potential: f64,
    seasonality: f64,
    competitor_coverage: f64,
    user_sentiment: f64,
    #[serde(default)]
    reasoning: Option<FactorNotes>,
}

/// Score a batch of candidate topics against the workspace's content context.
///
/// Always returns exactly one [`ScoredTopic`] per input topic, in no
/// guaranteed order — callers must index by `topic_id`, not position. An
/// empty batch returns an empty list without any oracle call.
pub async fn calculate_priority_scores(
    client: &dyn CompletionClient,
    topics: &[TopicCandidate],
    context: &ScoringContext,
) -> Vec<ScoredTopic> {
    if topics.is_empty() {
        return Vec::new();
    }

    let request = CompletionRequest::new(SCORING_SYSTEM_PROMPT, build_user_prompt(topics, context))
        .json()
        .temperature(0.3)
        .max_tokens(4096);

    let entries = match client.complete(&request).await {
        Ok(text) => parse_score_entries(&text),
        Err(e) => {
            tracing::warn!(
                error = %e,
                topic_count = topics.len(),
                "scoring oracle call failed, falling back to default scores"
            );
            HashMap::new()
        }
    };

    let matched = entries.len();
    if matched < topics.len() {
        tracing::debug!(
            requested = topics.len(),
            matched,
            "oracle response did not cover the full batch"
        );
    }

    topics
        .iter()
        .map(|topic| match entries.get(&topic.id) {
            Some(entry) => scored_from_entry(topic.id, entry),
            None => ScoredTopic {
                topic_id: topic.id,
                total: FALLBACK_TOTAL,
                breakdown: fallback_breakdown(),
            },
        })
        .collect()
}

/// The fixed deterministic breakdown assigned when the oracle cannot be
/// trusted for a topic or batch. Totals [`FALLBACK_TOTAL`].
#[must_use]
pub fn fallback_breakdown() -> PriorityScoreBreakdown {
    PriorityScoreBreakdown {
        content_gap: 10,
        trending: 10,
        engagement_potential: 10,
        seasonality: 7,
        competitor_coverage: 7,
        user_sentiment: 6,
        scored_at: Utc::now(),
        notes: None,
    }
}

fn scored_from_entry(topic_id: i64, entry: &RawScoreEntry) -> ScoredTopic {
    let breakdown = PriorityScoreBreakdown {
        content_gap: clamp_factor(entry.content_gap, CONTENT_GAP_MAX),
        trending: clamp_factor(entry.trending, TRENDING_MAX),
        engagement_potential: clamp_factor(entry.engagement_potential, ENGAGEMENT_MAX),
        seasonality: clamp_factor(entry.seasonality, SEASONALITY_MAX),
        competitor_coverage: clamp_factor(entry.competitor_coverage, COMPETITOR_MAX),
        user_sentiment: clamp_factor(entry.user_sentiment, SENTIMENT_MAX),
        scored_at: Utc::now(),
        notes: entry.reasoning.clone(),
    };
    ScoredTopic {
        topic_id,
        total: breakdown.total(),
        breakdown,
    }
}

/// Round to the nearest integer and clamp into `[0, max]`.
fn clamp_factor(raw: f64, max: i32) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = raw.round() as i32;
    rounded.clamp(0, max)
}

/// Parse the response into a map keyed by topic id. Entries that fail to
/// deserialize are skipped; duplicate ids keep the first occurrence.
fn parse_score_entries(text: &str) -> HashMap<i64, RawScoreEntry> {
    let Some(value) = extract_json(text) else {
        tracing::warn!("scoring oracle returned no parseable JSON");
        return HashMap::new();
    };

    let Some(raw_entries) = value.get("scores").and_then(serde_json::Value::as_array) else {
        tracing::warn!("scoring oracle response is missing the scores array");
        return HashMap::new();
    };

    let mut entries: HashMap<i64, RawScoreEntry> = HashMap::new();
    for raw in raw_entries {
        match serde_json::from_value::<RawScoreEntry>(raw.clone()) {
            Ok(entry) => {
                entries.entry(entry.topic_id).or_insert(entry);
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed score entry");
            }
        }
    }
    entries
}

const SCORING_SYSTEM_PROMPT: &str = "\
You are a content strategy analyst. You score candidate content topics for a \
business against six weighted factors and return strict JSON.

Factors and ranges:
- contentGap (0-20): how underserved this topic is by the existing content
- trending (0-20): current audience interest and momentum
- engagementPotential (0-20): likelihood of shares, replies, conversions
- seasonality (0-15): timeliness for the current period
- competitorCoverage (0-15): opportunity relative to competitor coverage \
(more points when competitors have NOT covered it well)
- userSentiment (0-10): how positively the audience responds to this theme

Respond with a single JSON object of the form \
{\"scores\": [{\"topicId\": <id>, \"contentGap\": <n>, \"trending\": <n>, \
\"engagementPotential\": <n>, \"seasonality\": <n>, \"competitorCoverage\": <n>, \
\"userSentiment\": <n>, \"reasoning\": {\"contentGap\": \"...\"}}]}. \
Include every topic exactly once. Keep reasoning strings short.";

fn build_user_prompt(topics: &[TopicCandidate], context: &ScoringContext) -> String {
    let mut prompt = String::new();

    if context.existing_content.is_empty() {
        prompt.push_str("Existing published content: none yet (starting fresh).\n");
    } else {
        prompt.push_str("Existing published content:\n");
        for line in &context.existing_content {
            let _ = writeln!(prompt, "- {line}");
        }
    }

    if !context.recent_topics.is_empty() {
        prompt.push_str("\nTopics already queued:\n");
        for title in &context.recent_topics {
            let _ = writeln!(prompt, "- {title}");
        }
    }

    if let Some(industry) = &context.industry_context {
        let _ = writeln!(prompt, "\nIndustry context: {industry}");
    }

    prompt.push_str("\nScore each of the following candidate topics:\n");
    for topic in topics {
        let _ = writeln!(
            prompt,
            "\ntopicId: {}\ntitle: {}\ncategory: {}\ndescription: {}\nwhy it works: {}",
            topic.id, topic.title, topic.category, topic.description, topic.why_it_works
        );
    }

    prompt
}
