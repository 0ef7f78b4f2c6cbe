//! Conversation analysis: one oracle call that classifies a finished
//! transcript into typed learning insights.

use neptune_core::LearningInsight;
use neptune_db::{ConversationMessageRow, DbError};
use neptune_oracle::{extract_json, CompletionClient, CompletionRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// Conversations shorter than this carry too little signal to analyze.
const MIN_MESSAGES: i64 = 4;
/// How much of a long conversation is read back for analysis.
const MESSAGE_WINDOW: i64 = 100;
/// Insights below this confidence are discarded even if the oracle emits
/// them despite the prompt's instruction.
const MIN_INSIGHT_CONFIDENCE: f64 = 0.6;

const ANALYSIS_SYSTEM_PROMPT: &str = "\
You extract durable facts about a user from an assistant conversation \
transcript. Classify what you learn into insights of type \"preference\" \
(how the user wants to be communicated with), \"topic\" (subjects the user \
cares about), \"correction\" (facts the user corrected), or \"pattern\" \
(recurring behavior).

Respond with a single JSON object: {\"insights\": [{\"type\": \"preference\", \
\"key\": \"communication_style\", \"value\": \"...\", \"confidence\": 0.8}]}. \
Only include insights you are confident about (confidence 0.6 or higher). \
Return {\"insights\": []} when the conversation teaches you nothing durable.";

/// Analyze one finished conversation and return the insights it yields.
///
/// Short-circuits to an empty list without calling the oracle when the
/// conversation has fewer than 4 messages. Oracle failures and malformed
/// responses also yield an empty list — analysis is opportunistic, never a
/// source of errors for the caller.
///
/// # Errors
///
/// Returns [`DbError`] only if reading the conversation itself fails.
pub async fn analyze_conversation_for_learning(
    pool: &PgPool,
    client: &dyn CompletionClient,
    workspace_id: Uuid,
    user_id: Uuid,
    conversation_id: i64,
) -> Result<Vec<LearningInsight>, DbError> {
    let message_count = neptune_db::count_conversation_messages(pool, conversation_id).await?;
    if message_count < MIN_MESSAGES {
        tracing::debug!(
            %workspace_id,
            conversation_id,
            message_count,
            "conversation too short to analyze"
        );
        return Ok(Vec::new());
    }

    let messages =
        neptune_db::list_conversation_messages(pool, conversation_id, MESSAGE_WINDOW).await?;
    let transcript = build_transcript(&messages);

    let request = CompletionRequest::new(ANALYSIS_SYSTEM_PROMPT, transcript)
        .json()
        .temperature(0.2);

    let text = match client.complete(&request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                %workspace_id,
                %user_id,
                conversation_id,
                error = %e,
                "conversation analysis oracle call failed"
            );
            return Ok(Vec::new());
        }
    };

    Ok(parse_insights(&text))
}

/// Render messages as a `role: content` transcript.
fn build_transcript(messages: &[ConversationMessageRow]) -> String {
    let mut transcript = String::new();
    for message in messages {
        transcript.push_str(&message.role);
        transcript.push_str(": ");
        transcript.push_str(&message.content);
        transcript.push('\n');
    }
    transcript
}

/// Parse the oracle's response into insights, dropping malformed entries and
/// anything under the confidence floor.
fn parse_insights(text: &str) -> Vec<LearningInsight> {
    let Some(value) = extract_json(text) else {
        tracing::warn!("conversation analysis returned no parseable JSON");
        return Vec::new();
    };

    let Some(raw_insights) = value.get("insights").and_then(serde_json::Value::as_array) else {
        tracing::warn!("conversation analysis response is missing the insights array");
        return Vec::new();
    };

    raw_insights
        .iter()
        .filter_map(|raw| match serde_json::from_value::<LearningInsight>(raw.clone()) {
            Ok(insight) if insight.confidence >= MIN_INSIGHT_CONFIDENCE => Some(insight),
            Ok(insight) => {
                tracing::debug!(
                    key = %insight.key,
                    confidence = insight.confidence,
                    "dropping low-confidence insight"
                );
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed insight entry");
                None
            }
        })
        .collect()
}
