//! Workspace-level business-context learning.
//!
//! Periodically (driven externally, not self-scheduled) the full bodies of
//! recent conversations are distilled into one structured
//! industry/model/goals record per workspace.

use neptune_core::WorkspaceProfile;
use neptune_db::DbError;
use neptune_oracle::{structured_response, CompletionClient, CompletionRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Workspaces with fewer conversations than this are not worth analyzing yet.
const MIN_CONVERSATIONS: i64 = 5;
/// How many of the most recent conversations are read in full.
const RECENT_CONVERSATIONS: i64 = 10;
/// Per-conversation message cap when building the corpus.
const MESSAGES_PER_CONVERSATION: i64 = 50;

const BUSINESS_SYSTEM_PROMPT: &str = "\
You analyze a business's assistant conversations to infer durable facts \
about the business itself. Respond with a single JSON object: \
{\"industry\": \"...\", \"businessModel\": \"...\", \
\"goals\": [{\"goal\": \"...\", \"priority\": 1}], \
\"strategicPriorities\": [\"...\"]}. \
Omit any field you cannot infer with confidence rather than guessing.";

/// Derive and upsert the business-context record for a workspace.
///
/// Requires at least 5 conversations on record; otherwise returns `Ok(false)`
/// without calling the oracle. A failed or empty oracle response is also
/// `Ok(false)` — and never erases previously learned values, because the
/// upsert keeps existing fields whenever the new value is absent.
///
/// # Errors
///
/// Returns [`DbError`] on storage failure.
pub async fn learn_business_context(
    pool: &PgPool,
    client: &dyn CompletionClient,
    workspace_id: Uuid,
) -> Result<bool, DbError> {
    let conversation_count = neptune_db::count_conversations(pool, workspace_id).await?;
    if conversation_count < MIN_CONVERSATIONS {
        tracing::debug!(
            %workspace_id,
            conversation_count,
            "not enough conversations for business-context analysis"
        );
        return Ok(false);
    }

    let conversations =
        neptune_db::list_recent_conversations(pool, workspace_id, RECENT_CONVERSATIONS).await?;

    let mut corpus = String::new();
    for conversation in &conversations {
        let messages =
            neptune_db::list_conversation_messages(pool, conversation.id, MESSAGES_PER_CONVERSATION)
                .await?;
        corpus.push_str("--- Conversation: ");
        corpus.push_str(&conversation.title);
        corpus.push_str(" ---\n");
        for message in &messages {
            corpus.push_str(&message.role);
            corpus.push_str(": ");
            corpus.push_str(&message.content);
            corpus.push('\n');
        }
        corpus.push('\n');
    }

    let request = CompletionRequest::new(BUSINESS_SYSTEM_PROMPT, corpus).temperature(0.2);
    let Some(profile) = structured_response::<WorkspaceProfile>(client, request).await else {
        tracing::warn!(%workspace_id, "business-context analysis produced no usable profile");
        return Ok(false);
    };

    if profile.is_empty() {
        tracing::info!(%workspace_id, "business-context analysis found nothing to record");
        return Ok(false);
    }

    let goals = (!profile.goals.is_empty())
        .then(|| serde_json::to_value(&profile.goals).ok())
        .flatten();
    let priorities = (!profile.strategic_priorities.is_empty())
        .then(|| serde_json::to_value(&profile.strategic_priorities).ok())
        .flatten();

    neptune_db::upsert_workspace_intelligence(
        pool,
        workspace_id,
        profile.industry.as_deref(),
        profile.business_model.as_deref(),
        goals.as_ref(),
        priorities.as_ref(),
        i32::try_from(conversation_count).unwrap_or(i32::MAX),
    )
    .await?;

    tracing::info!(
        %workspace_id,
        conversations_analyzed = conversation_count,
        "workspace business context updated"
    );
    Ok(true)
}
