//! Database operations for the `message_feedback` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `message_feedback` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageFeedbackRow {
    pub id: i64,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub message_id: i64,
    pub helpful: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert a feedback row for an assistant message.
///
/// The table enforces one feedback row per (user, message); a second insert
/// surfaces as [`DbError::Duplicate`] so callers can treat it as a soft
/// failure instead of an exception.
///
/// # Errors
///
/// Returns [`DbError::Duplicate`] when feedback already exists for this
/// (user, message) pair, or [`DbError::Sqlx`] on other query failures.
pub async fn insert_message_feedback(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    message_id: i64,
    helpful: bool,
    comment: Option<&str>,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO message_feedback (workspace_id, user_id, message_id, helpful, comment) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(workspace_id)
    .bind(user_id)
    .bind(message_id)
    .bind(helpful)
    .bind(comment)
    .fetch_one(pool)
    .await
    .map_err(DbError::from_sqlx)?;

    Ok(id)
}
