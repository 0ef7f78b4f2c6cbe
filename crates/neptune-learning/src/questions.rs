//! Frequent-question tracking with fuzzy duplicate detection.

use neptune_db::DbError;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::preferences::string_list;

/// Normalized questions shorter than this carry no reusable signal.
const MIN_NORMALIZED_LEN: usize = 10;
/// Normalized questions are truncated to this length before storage.
const MAX_NORMALIZED_LEN: usize = 100;
/// Length of the prefix used for fuzzy duplicate matching.
const MATCH_PREFIX_LEN: usize = 30;
/// Most recent N questions are retained.
const QUESTIONS_KEPT: usize = 10;

/// Interrogative contractions expanded before punctuation stripping, so
/// "what's our churn" and "what is our churn" normalize to the same text.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("when's", "when is"),
    ("how's", "how is"),
    ("why's", "why is"),
    ("that's", "that is"),
    ("it's", "it is"),
];

/// Track a question the user asked, deduplicating against near-identical
/// phrasings already on record.
///
/// Returns `true` when the question was added, `false` when it was skipped
/// (too short after normalization, or matched an existing entry). A missing
/// preference record is created first.
///
/// # Errors
///
/// Returns [`DbError`] on storage failure.
pub async fn track_frequent_question(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    question: &str,
) -> Result<bool, DbError> {
    let normalized = normalize_question(question);
    if normalized.chars().count() < MIN_NORMALIZED_LEN {
        return Ok(false);
    }

    neptune_db::insert_default_preferences(pool, workspace_id, user_id).await?;
    let Some(record) = neptune_db::get_user_preferences(pool, workspace_id, user_id).await? else {
        return Err(DbError::NotFound);
    };

    let mut questions = string_list(&record.frequent_questions);
    if questions.iter().any(|existing| is_same_question(existing, &normalized)) {
        tracing::debug!(%workspace_id, %user_id, "question already tracked");
        return Ok(false);
    }

    questions.push(normalized);
    if questions.len() > QUESTIONS_KEPT {
        let excess = questions.len() - QUESTIONS_KEPT;
        questions.drain(..excess);
    }

    neptune_db::save_user_preferences(
        pool,
        workspace_id,
        user_id,
        record.communication_style.as_deref(),
        &record.topics_of_interest,
        &Value::from(questions),
        &record.corrections,
    )
    .await?;

    Ok(true)
}

/// Lowercase, expand interrogative contractions, strip punctuation, collapse
/// whitespace, and truncate to 100 characters.
fn normalize_question(question: &str) -> String {
    let mut text = question.to_lowercase();
    for (from, to) in CONTRACTIONS {
        text = text.replace(from, to);
    }

    let stripped: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_NORMALIZED_LEN)
        .collect()
}

/// Fuzzy sameness: the first 30 characters of either question must appear at
/// the start of the other. Intentionally looser than exact matching so
/// rephrasings of the same ask collapse into one entry.
fn is_same_question(a: &str, b: &str) -> bool {
    let prefix_a: String = a.chars().take(MATCH_PREFIX_LEN).collect();
    let prefix_b: String = b.chars().take(MATCH_PREFIX_LEN).collect();
    a.starts_with(prefix_b.as_str()) || b.starts_with(prefix_a.as_str())
}
