//! Per-message feedback capture.

use neptune_db::DbError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::preferences::record_correction;

/// Record thumbs-up/thumbs-down feedback on an assistant message.
///
/// Duplicate feedback on the same message is a recoverable condition: it is
/// logged as a warning and reported as `Ok(false)`, never an error. Negative
/// feedback that carries a comment also records a correction, with the
/// original message content as the "wrong" value and the comment as the
/// "correct" one.
///
/// # Errors
///
/// Returns [`DbError`] on storage failure other than a duplicate row.
pub async fn record_message_feedback(
    pool: &PgPool,
    workspace_id: Uuid,
    user_id: Uuid,
    message_id: i64,
    helpful: bool,
    comment: Option<&str>,
    message_content: &str,
) -> Result<bool, DbError> {
    match neptune_db::insert_message_feedback(
        pool,
        workspace_id,
        user_id,
        message_id,
        helpful,
        comment,
    )
    .await
    {
        Ok(_) => {}
        Err(DbError::Duplicate) => {
            tracing::warn!(
                %workspace_id,
                %user_id,
                message_id,
                "feedback already recorded for this message"
            );
            return Ok(false);
        }
        Err(e) => return Err(e),
    }

    if !helpful {
        if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
            record_correction(pool, workspace_id, user_id, message_content, comment).await?;
        }
    }

    tracing::debug!(%workspace_id, %user_id, message_id, helpful, "feedback recorded");
    Ok(true)
}
