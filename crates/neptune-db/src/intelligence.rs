//! Database operations for the `workspace_intelligence` table.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `workspace_intelligence` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkspaceIntelligenceRow {
    pub workspace_id: Uuid,
    pub industry: Option<String>,
    pub business_model: Option<String>,
    pub goals: Value,
    pub strategic_priorities: Value,
    pub conversations_analyzed: i32,
    pub last_analyzed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Get the intelligence record for a workspace, if it exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn get_workspace_intelligence(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<Option<WorkspaceIntelligenceRow>, DbError> {
    Ok(sqlx::query_as::<_, WorkspaceIntelligenceRow>(
        "SELECT workspace_id, industry, business_model, goals, strategic_priorities, \
                conversations_analyzed, last_analyzed_at, created_at, updated_at \
         FROM workspace_intelligence \
         WHERE workspace_id = $1",
    )
    .bind(workspace_id)
    .fetch_optional(pool)
    .await?)
}

/// Upsert (insert or update) the single intelligence row for a workspace.
///
/// Uses `COALESCE` so that a `None`/`NULL` field from a weak oracle response
/// never erases a previously learned value. The JSONB lists follow the same
/// rule: pass `None` to keep whatever is stored.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn upsert_workspace_intelligence(
    pool: &PgPool,
    workspace_id: Uuid,
    industry: Option<&str>,
    business_model: Option<&str>,
    goals: Option<&Value>,
    strategic_priorities: Option<&Value>,
    conversations_analyzed: i32,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO workspace_intelligence \
           (workspace_id, industry, business_model, goals, strategic_priorities, \
            conversations_analyzed, last_analyzed_at) \
         VALUES ($1, $2, $3, COALESCE($4, '[]'::jsonb), COALESCE($5, '[]'::jsonb), $6, NOW()) \
         ON CONFLICT (workspace_id) DO UPDATE SET \
           industry             = COALESCE(EXCLUDED.industry,       workspace_intelligence.industry), \
           business_model       = COALESCE(EXCLUDED.business_model, workspace_intelligence.business_model), \
           goals                = CASE WHEN $4 IS NULL THEN workspace_intelligence.goals \
                                       ELSE EXCLUDED.goals END, \
           strategic_priorities = CASE WHEN $5 IS NULL THEN workspace_intelligence.strategic_priorities \
                                       ELSE EXCLUDED.strategic_priorities END, \
           conversations_analyzed = EXCLUDED.conversations_analyzed, \
           last_analyzed_at     = NOW(), \
           updated_at           = NOW()",
    )
    .bind(workspace_id)
    .bind(industry)
    .bind(business_model)
    .bind(goals)
    .bind(strategic_priorities)
    .bind(conversations_analyzed)
    .execute(pool)
    .await?;

    Ok(())
}
