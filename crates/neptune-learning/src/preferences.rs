//! Folding learned insights and explicit corrections into the per-user
//! preference record.

use chrono::Utc;
use neptune_core::{Correction, InsightKind, LearningInsight, PreferredStyle};
use neptune_db::DbError;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Learned insights below this confidence are never applied. Deliberately
/// stricter than the 0.6 floor the analysis prompt asks the oracle to honor.
const APPLY_CONFIDENCE: f64 = 0.7;
/// Bounded-list sizes: most recent N are retained.
const TOPICS_KEPT: usize = 10;
const CORRECTIONS_KEPT: usize = 20;

/// Apply a batch of learned insights to the user's preference record.
///
/// No-op when `insights` is empty or when no preference record exists for
/// the pair. Only insights at or above the apply-confidence floor take
/// effect. Returns `true` when something actually changed and was persisted.
///
/// # Errors
///
/// Returns [`DbError`] on storage failure.
pub async fn update_user_preferences_from_insights(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    insights: &[LearningInsight],
) -> Result<bool, DbError> {
    if insights.is_empty() {
        return Ok(false);
    }

    let Some(record) = neptune_db::get_user_preferences(pool, workspace_id, user_id).await? else {
        tracing::debug!(%workspace_id, %user_id, "no preference record; skipping insight update");
        return Ok(false);
    };

    let mut style = record
        .communication_style
        .as_deref()
        .and_then(PreferredStyle::parse);
    let mut topics = string_list(&record.topics_of_interest);
    let mut changed = false;

    for insight in insights {
        if insight.confidence < APPLY_CONFIDENCE {
            tracing::debug!(
                key = %insight.key,
                confidence = insight.confidence,
                "insight below apply threshold; ignoring"
            );
            continue;
        }

        match insight.kind {
            InsightKind::Preference if insight.key.contains("communication_style") => {
                if let Some(mapped) = map_style_keyword(&insight.value) {
                    if style != Some(mapped) {
                        style = Some(mapped);
                        changed = true;
                    }
                }
            }
            InsightKind::Topic => {
                if push_bounded(&mut topics, &insight.value, TOPICS_KEPT) {
                    changed = true;
                }
            }
            // Correction and pattern insights do not touch the preference
            // record directly; corrections arrive through record_correction.
            _ => {}
        }
    }

    if !changed {
        return Ok(false);
    }

    neptune_db::save_user_preferences(
        pool,
        workspace_id,
        user_id,
        style.map(PreferredStyle::as_str),
        &Value::from(topics),
        &record.frequent_questions,
        &record.corrections,
    )
    .await?;

    tracing::info!(%workspace_id, %user_id, "preference record updated from insights");
    Ok(true)
}

/// Record an explicit "you said X, actually Y" correction.
///
/// Applied unconditionally: a missing preference record is created first.
/// The corrections list keeps the most recent 20 entries.
///
/// # Errors
///
/// Returns [`DbError`] on storage failure.
pub async fn record_correction(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    wrong: &str,
    correct: &str,
) -> Result<(), DbError> {
    neptune_db::insert_default_preferences(pool, workspace_id, user_id).await?;
    let Some(record) = neptune_db::get_user_preferences(pool, workspace_id, user_id).await? else {
        // The insert above guarantees a row; treat absence as a contract
        // violation rather than silently dropping the correction.
        return Err(DbError::NotFound);
    };

    let mut corrections: Vec<Correction> = correction_list(&record.corrections);
    corrections.push(Correction {
        wrong: wrong.to_string(),
        correct: correct.to_string(),
        timestamp: Utc::now(),
    });
    if corrections.len() > CORRECTIONS_KEPT {
        let excess = corrections.len() - CORRECTIONS_KEPT;
        corrections.drain(..excess);
    }

    let corrections_value = serde_json::to_value(&corrections).unwrap_or_else(|_| Value::from(Vec::<Value>::new()));

    neptune_db::save_user_preferences(
        pool,
        workspace_id,
        user_id,
        record.communication_style.as_deref(),
        &record.topics_of_interest,
        &record.frequent_questions,
        &corrections_value,
    )
    .await?;

    tracing::info!(%workspace_id, %user_id, "correction recorded");
    Ok(())
}

/// Map free-text style feedback onto the coarse concise/detailed switch.
fn map_style_keyword(value: &str) -> Option<PreferredStyle> {
    let lower = value.to_lowercase();
    if lower.contains("brief") || lower.contains("concise") || lower.contains("short") {
        Some(PreferredStyle::Concise)
    } else if lower.contains("detail") {
        Some(PreferredStyle::Detailed)
    } else {
        None
    }
}

/// Append `value` if absent (case-insensitive), keeping the most recent
/// `cap` entries. Returns `true` when the list changed.
fn push_bounded(list: &mut Vec<String>, value: &str, cap: usize) -> bool {
    let lower = value.to_lowercase();
    if list.iter().any(|existing| existing.to_lowercase() == lower) {
        return false;
    }
    list.push(value.to_string());
    if list.len() > cap {
        let excess = list.len() - cap;
        list.drain(..excess);
    }
    true
}

/// Read a JSONB string array leniently; non-string entries are dropped.
pub(crate) fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn correction_list(value: &Value) -> Vec<Correction> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
