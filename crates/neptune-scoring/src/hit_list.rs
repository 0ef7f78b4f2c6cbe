//! Batch reprioritization of a workspace's hit list.

use neptune_db::DbError;
use neptune_oracle::CompletionClient;
use sqlx::PgPool;
use uuid::Uuid;

use crate::engine::{self, ScoringContext, TopicCandidate};

/// How many published pieces feed the gap-analysis context.
const GAP_CONTEXT_LIMIT: i64 = 50;

/// Result of one reprioritization run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReprioritizeOutcome {
    pub topics_considered: usize,
    pub topics_scored: usize,
}

/// Rescore every `saved` topic in the workspace with one oracle batch call
/// and persist each returned score individually.
///
/// An empty queue is a successful no-op. Oracle trouble never fails the run
/// (the engine falls back per topic); only storage failures while gathering
/// the batch propagate. Individual score writes that fail are logged and
/// skipped so one bad row cannot abort the rest of the batch.
///
/// # Errors
///
/// Returns [`DbError`] if the saved-topic or published-content reads fail.
pub async fn reprioritize(
    pool: &PgPool,
    client: &dyn CompletionClient,
    workspace_id: Uuid,
) -> Result<ReprioritizeOutcome, DbError> {
    let saved = neptune_db::list_saved_topics(pool, workspace_id).await?;
    if saved.is_empty() {
        tracing::info!(%workspace_id, "no saved topics to reprioritize");
        return Ok(ReprioritizeOutcome::default());
    }

    let published = neptune_db::list_published_topics(pool, workspace_id, GAP_CONTEXT_LIMIT).await?;

    // Industry context is a nice-to-have; a missing or failing intelligence
    // read must not block rescoring.
    let industry_context = match neptune_db::get_workspace_intelligence(pool, workspace_id).await {
        Ok(row) => row.and_then(|r| r.industry),
        Err(e) => {
            tracing::warn!(%workspace_id, error = %e, "could not load workspace intelligence");
            None
        }
    };

    let context = ScoringContext {
        existing_content: published
            .iter()
            .map(|row| format!("{} ({})", row.title, row.category))
            .collect(),
        recent_topics: saved.iter().map(|row| row.title.clone()).collect(),
        industry_context,
    };

    let candidates: Vec<TopicCandidate> = saved
        .iter()
        .map(|row| TopicCandidate {
            id: row.id,
            title: row.title.clone(),
            description: row.description.clone(),
            why_it_works: row.why_it_works.clone(),
            category: row.category.clone(),
        })
        .collect();

    let scored = engine::calculate_priority_scores(client, &candidates, &context).await;

    let mut persisted = 0usize;
    for result in &scored {
        let breakdown = match serde_json::to_value(&result.breakdown) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(topic_id = result.topic_id, error = %e, "breakdown serialization failed");
                continue;
            }
        };
        match neptune_db::update_topic_score(pool, result.topic_id, result.total, &breakdown).await
        {
            Ok(()) => persisted += 1,
            Err(e) => {
                tracing::warn!(
                    topic_id = result.topic_id,
                    error = %e,
                    "failed to persist topic score"
                );
            }
        }
    }

    tracing::info!(
        %workspace_id,
        considered = candidates.len(),
        scored = persisted,
        "reprioritization complete"
    );

    Ok(ReprioritizeOutcome {
        topics_considered: candidates.len(),
        topics_scored: persisted,
    })
}
