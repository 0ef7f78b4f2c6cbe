//! Database operations for the `user_preferences` table.
//!
//! One row per (workspace, user). The bounded lists (topics of interest,
//! frequent questions, corrections) are stored as JSONB arrays; truncation
//! policy lives in the learning crate, not here.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `user_preferences` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserPreferenceRow {
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub communication_style: Option<String>,
    pub topics_of_interest: Value,
    pub frequent_questions: Value,
    pub corrections: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Get the preference record for a (workspace, user) pair, if one exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_user_preferences(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<Option<UserPreferenceRow>, DbError> {
    Ok(sqlx::query_as::<_, UserPreferenceRow>(
        "SELECT workspace_id, user_id, communication_style, topics_of_interest, \
                frequent_questions, corrections, created_at, updated_at \
         FROM user_preferences \
         WHERE workspace_id = $1 AND user_id = $2",
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?)
}

/// Create an empty preference record for a (workspace, user) pair.
///
/// Idempotent: an existing record is left untouched. Returns `true` when a
/// new row was created.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn insert_default_preferences(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "INSERT INTO user_preferences (workspace_id, user_id) \
         VALUES ($1, $2) \
         ON CONFLICT (workspace_id, user_id) DO NOTHING",
    )
    .bind(workspace_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist the full mutable portion of a preference record.
///
/// Last-writer-wins: no optimistic-concurrency check. Callers pass the
/// already-bounded lists.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no record exists for the pair, or
/// [`DbError::Sqlx`] on query failure.
pub async fn save_user_preferences(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    communication_style: Option<&str>,
    topics_of_interest: &Value,
    frequent_questions: &Value,
    corrections: &Value,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE user_preferences \
         SET communication_style = $3, topics_of_interest = $4, \
             frequent_questions = $5, corrections = $6, updated_at = NOW() \
         WHERE workspace_id = $1 AND user_id = $2",
    )
    .bind(workspace_id)
    .bind(user_id)
    .bind(communication_style)
    .bind(topics_of_interest)
    .bind(frequent_questions)
    .bind(corrections)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
