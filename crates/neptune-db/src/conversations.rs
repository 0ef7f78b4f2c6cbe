//! Read-side operations over `conversations` and `conversation_messages`.
//!
//! These tables are written by the chat layer; the learning loop only reads
//! them, so this module exposes no mutations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `conversations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationRow {
    pub id: i64,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `conversation_messages` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationMessageRow {
    pub id: i64,
    pub conversation_id: i64,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Count all conversations in a workspace.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn count_conversations(pool: &PgPool, workspace_id: Uuid) -> Result<i64, DbError> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE workspace_id = $1")
            .bind(workspace_id)
            .fetch_one(pool)
            .await?,
    )
}

/// Count the messages in one conversation.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn count_conversation_messages(
    pool: &PgPool,
    conversation_id: i64,
) -> Result<i64, DbError> {
    Ok(sqlx::query_scalar(
        "SELECT COUNT(*) FROM conversation_messages WHERE conversation_id = $1",
    )
    .bind(conversation_id)
    .fetch_one(pool)
    .await?)
}

/// List a workspace's most recently active conversations.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_recent_conversations(
    pool: &PgPool,
    workspace_id: Uuid,
    limit: i64,
) -> Result<Vec<ConversationRow>, DbError> {
    let rows = sqlx::query_as::<_, ConversationRow>(
        "SELECT id, workspace_id, user_id, title, created_at, updated_at \
         FROM conversations \
         WHERE workspace_id = $1 \
         ORDER BY updated_at DESC \
         LIMIT $2",
    )
    .bind(workspace_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List the messages of one conversation in chronological order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_conversation_messages(
    pool: &PgPool,
    conversation_id: i64,
    limit: i64,
) -> Result<Vec<ConversationMessageRow>, DbError> {
    let rows = sqlx::query_as::<_, ConversationMessageRow>(
        "SELECT id, conversation_id, role, content, created_at \
         FROM conversation_messages \
         WHERE conversation_id = $1 \
         ORDER BY created_at ASC, id ASC \
         LIMIT $2",
    )
    .bind(conversation_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Workspaces that currently have at least one topic waiting in `saved`.
///
/// Drives the recurring reprioritization job.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_workspaces_with_saved_topics(pool: &PgPool) -> Result<Vec<Uuid>, DbError> {
    Ok(sqlx::query_scalar(
        "SELECT DISTINCT workspace_id FROM hit_list_topics WHERE status = 'saved'",
    )
    .fetch_all(pool)
    .await?)
}

/// Workspaces with at least `min_conversations` conversations on record.
///
/// Drives the recurring business-context learning job.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_workspaces_with_conversations(
    pool: &PgPool,
    min_conversations: i64,
) -> Result<Vec<Uuid>, DbError> {
    Ok(sqlx::query_scalar(
        "SELECT workspace_id FROM conversations \
         GROUP BY workspace_id \
         HAVING COUNT(*) >= $1",
    )
    .bind(min_conversations)
    .fetch_all(pool)
    .await?)
}
