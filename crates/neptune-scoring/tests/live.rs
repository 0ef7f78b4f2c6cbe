//! Live integration tests for the scoring pipeline against a real Postgres
//! database, with the oracle stubbed out.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use neptune_core::TopicStatus;
use neptune_db::{add_topic, list_top_scored, update_topic_status, NewTopic};
use neptune_oracle::{CompletionClient, CompletionRequest, OracleError};
use neptune_scoring::{reprioritize, what_to_write_next, FALLBACK_TOTAL};
use uuid::Uuid;

struct StubOracle {
    response: Option<String>,
    calls: Arc<AtomicU32>,
}

impl StubOracle {
    fn returning(text: String) -> Self {
        Self {
            response: Some(text),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

#[async_trait]
impl CompletionClient for StubOracle {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or(OracleError::EmptyResponse)
    }
}

fn make_topic(title: &str) -> NewTopic {
    NewTopic {
        title: title.to_string(),
        description: format!("{title} description"),
        why_it_works: "it answers a recurring question".to_string(),
        category: "guide".to_string(),
        target_publish_date: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn reprioritize_empty_workspace_is_noop_without_oracle_call(pool: sqlx::PgPool) {
    let oracle = StubOracle::failing();
    let outcome = reprioritize(&pool, &oracle, Uuid::new_v4()).await.unwrap();

    assert_eq!(outcome.topics_considered, 0);
    assert_eq!(outcome.topics_scored, 0);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn reprioritize_persists_clamped_scores(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let first = add_topic(&pool, workspace, &make_topic("first")).await.unwrap();
    let second = add_topic(&pool, workspace, &make_topic("second")).await.unwrap();

    let body = serde_json::json!({
        "scores": [{
            "topicId": first.id,
            "contentGap": 99,       // clamped to 20
            "trending": 15,
            "engagementPotential": 10,
            "seasonality": 5,
            "competitorCoverage": 5,
            "userSentiment": 5,
        }]
    });
    let oracle = StubOracle::returning(body.to_string());

    let outcome = reprioritize(&pool, &oracle, workspace).await.unwrap();
    assert_eq!(outcome.topics_considered, 2);
    assert_eq!(outcome.topics_scored, 2, "unmatched topics still get fallback scores");

    let rows = list_top_scored(&pool, workspace, 20).await.unwrap();
    let matched = rows.iter().find(|r| r.id == first.id).unwrap();
    let fallback = rows.iter().find(|r| r.id == second.id).unwrap();

    assert_eq!(matched.priority_score, Some(20 + 15 + 10 + 5 + 5 + 5));
    assert_eq!(matched.score_breakdown.as_ref().unwrap()["contentGap"], 20);
    assert_eq!(fallback.priority_score, Some(FALLBACK_TOTAL));
}

#[sqlx::test(migrations = "../../migrations")]
async fn next_up_report_reflects_live_rows(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let queued = add_topic(&pool, workspace, &make_topic("queued")).await.unwrap();
    let wip = add_topic(&pool, workspace, &make_topic("wip")).await.unwrap();
    update_topic_status(&pool, wip.id, TopicStatus::InProgress).await.unwrap();

    let report = what_to_write_next(&pool, workspace).await;
    assert_eq!(report.total_queued, 1);
    assert_eq!(report.in_progress, 1);
    assert_eq!(report.top_priority.unwrap().id, queued.id);
    assert!(report.recommendation.unwrap().contains("queued"));
}
