//! Database operations for the `hit_list_topics` table.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `hit_list_topics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HitListTopicRow {
    pub id: i64,
    pub workspace_id: Uuid,
    pub title: String,
    pub description: String,
    pub why_it_works: String,
    pub category: String,
    pub target_publish_date: Option<NaiveDate>,
    pub status: String,
    pub hit_list_position: i32,
    pub priority_score: Option<i32>,
    pub score_breakdown: Option<Value>,
    pub scored_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the user when adding a topic to the hit list.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub why_it_works: String,
    pub category: String,
    pub target_publish_date: Option<NaiveDate>,
}

const TOPIC_COLUMNS: &str = "id, workspace_id, title, description, why_it_works, category, \
     target_publish_date, status, hit_list_position, priority_score, score_breakdown, \
     scored_at, created_at, updated_at";

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Insert a new topic at the end of the workspace's hit list.
///
/// Position allocation runs inside a transaction holding a per-workspace
/// advisory lock, so the read-max-then-insert sequence is atomic with respect
/// to other concurrent adds for the same workspace. The lock is released on
/// commit. A plain `SELECT ... FOR UPDATE` cannot cover the empty-list case
/// (there is no row to lock yet), which is why the lock is taken on the
/// workspace key instead of on topic rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction fails.
pub async fn add_topic(
    pool: &PgPool,
    workspace_id: Uuid,
    topic: &NewTopic,
) -> Result<HitListTopicRow, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
        .bind(workspace_id)
        .execute(&mut *tx)
        .await?;

    let max_position: i32 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(hit_list_position), 0) FROM hit_list_topics \
         WHERE workspace_id = $1",
    )
    .bind(workspace_id)
    .fetch_one(&mut *tx)
    .await?;

    let row = sqlx::query_as::<_, HitListTopicRow>(&format!(
        "INSERT INTO hit_list_topics \
             (workspace_id, title, description, why_it_works, category, \
              target_publish_date, hit_list_position) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {TOPIC_COLUMNS}"
    ))
    .bind(workspace_id)
    .bind(&topic.title)
    .bind(&topic.description)
    .bind(&topic.why_it_works)
    .bind(&topic.category)
    .bind(topic.target_publish_date)
    .bind(max_position + 1)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Write a computed priority score and its breakdown onto one topic.
///
/// `breakdown` is the serialized six-factor breakdown, stored as JSONB.
/// `scored_at` and `updated_at` are stamped server-side.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the topic does not exist, or
/// [`DbError::Sqlx`] on query failure.
pub async fn update_topic_score(
    pool: &PgPool,
    topic_id: i64,
    score: i32,
    breakdown: &Value,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE hit_list_topics \
         SET priority_score = $2, score_breakdown = $3, scored_at = NOW(), updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(topic_id)
    .bind(score)
    .bind(breakdown)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Transition a topic's lifecycle status (a user action, not a scoring one).
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the topic does not exist, or
/// [`DbError::Sqlx`] on query failure.
pub async fn update_topic_status(
    pool: &PgPool,
    topic_id: i64,
    status: neptune_core::TopicStatus,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE hit_list_topics SET status = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(topic_id)
    .bind(status.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// List the workspace's top topics by priority score, highest first.
///
/// Unscored topics sort last. Ties break by hit-list position.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_top_scored(
    pool: &PgPool,
    workspace_id: Uuid,
    limit: i64,
) -> Result<Vec<HitListTopicRow>, DbError> {
    let rows = sqlx::query_as::<_, HitListTopicRow>(&format!(
        "SELECT {TOPIC_COLUMNS} FROM hit_list_topics \
         WHERE workspace_id = $1 \
         ORDER BY priority_score DESC NULLS LAST, hit_list_position ASC \
         LIMIT $2"
    ))
    .bind(workspace_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List all topics still in `saved` status for a workspace, in hit-list order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_saved_topics(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<Vec<HitListTopicRow>, DbError> {
    let rows = sqlx::query_as::<_, HitListTopicRow>(&format!(
        "SELECT {TOPIC_COLUMNS} FROM hit_list_topics \
         WHERE workspace_id = $1 AND status = 'saved' \
         ORDER BY hit_list_position ASC"
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List recently published topics, most recent first.
///
/// Used as existing-content context for gap analysis when rescoring.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_published_topics(
    pool: &PgPool,
    workspace_id: Uuid,
    limit: i64,
) -> Result<Vec<HitListTopicRow>, DbError> {
    let rows = sqlx::query_as::<_, HitListTopicRow>(&format!(
        "SELECT {TOPIC_COLUMNS} FROM hit_list_topics \
         WHERE workspace_id = $1 AND status = 'published' \
         ORDER BY updated_at DESC \
         LIMIT $2"
    ))
    .bind(workspace_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
