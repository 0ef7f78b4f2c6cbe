//! Live integration tests for neptune-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/neptune-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use std::collections::HashSet;

use neptune_core::TopicStatus;
use neptune_db::{
    add_topic, get_user_preferences, get_workspace_intelligence, insert_default_preferences,
    insert_message_feedback, list_published_topics, list_saved_topics, list_top_scored,
    save_user_preferences, update_topic_score, update_topic_status,
    upsert_workspace_intelligence, DbError, NewTopic,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_topic(title: &str) -> NewTopic {
    NewTopic {
        title: title.to_string(),
        description: format!("{title} description"),
        why_it_works: "resonates with the audience".to_string(),
        category: "general".to_string(),
        target_publish_date: None,
    }
}

// ---------------------------------------------------------------------------
// Section 1: Hit-list position allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn add_topic_assigns_sequential_positions(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();

    let first = add_topic(&pool, workspace, &make_topic("first")).await.unwrap();
    let second = add_topic(&pool, workspace, &make_topic("second")).await.unwrap();

    assert_eq!(first.hit_list_position, 1);
    assert_eq!(second.hit_list_position, 2);
    assert_eq!(first.status, "saved");
    assert!(first.priority_score.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn add_topic_positions_are_scoped_per_workspace(pool: sqlx::PgPool) {
    let ws_a = Uuid::new_v4();
    let ws_b = Uuid::new_v4();

    add_topic(&pool, ws_a, &make_topic("a1")).await.unwrap();
    let b1 = add_topic(&pool, ws_b, &make_topic("b1")).await.unwrap();

    assert_eq!(b1.hit_list_position, 1, "workspaces have independent position counters");
}

#[sqlx::test(migrations = "../../migrations")]
async fn concurrent_adds_never_collide_on_position(pool: sqlx::PgPool) {
    const N: usize = 8;
    let workspace = Uuid::new_v4();

    let mut handles = Vec::with_capacity(N);
    for i in 0..N {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            add_topic(&pool, workspace, &make_topic(&format!("topic-{i}"))).await
        }));
    }

    let mut positions = Vec::with_capacity(N);
    for handle in handles {
        let row = handle.await.unwrap().expect("concurrent add_topic failed");
        positions.push(row.hit_list_position);
    }

    let unique: HashSet<i32> = positions.iter().copied().collect();
    assert_eq!(unique.len(), N, "duplicate positions under concurrency: {positions:?}");

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    let expected: Vec<i32> = (1..=i32::try_from(N).unwrap()).collect();
    assert_eq!(sorted, expected, "positions must be dense 1..=N: {positions:?}");
}

// ---------------------------------------------------------------------------
// Section 2: Scoring writes and status reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_topic_score_persists_breakdown(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let topic = add_topic(&pool, workspace, &make_topic("scored")).await.unwrap();

    let breakdown = serde_json::json!({
        "contentGap": 15, "trending": 12, "engagementPotential": 18,
        "seasonality": 7, "competitorCoverage": 11, "userSentiment": 9,
        "scoredAt": "2026-01-15T00:00:00Z"
    });
    update_topic_score(&pool, topic.id, 72, &breakdown).await.unwrap();

    let rows = list_top_scored(&pool, workspace, 20).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].priority_score, Some(72));
    assert!(rows[0].scored_at.is_some());
    assert_eq!(rows[0].score_breakdown.as_ref().unwrap()["contentGap"], 15);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_topic_score_missing_topic_is_not_found(pool: sqlx::PgPool) {
    let result = update_topic_score(&pool, 999_999, 50, &serde_json::json!({})).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn status_transitions_partition_saved_and_published(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let keep = add_topic(&pool, workspace, &make_topic("keep")).await.unwrap();
    let publish = add_topic(&pool, workspace, &make_topic("publish")).await.unwrap();

    update_topic_status(&pool, publish.id, TopicStatus::Published).await.unwrap();

    let saved = list_saved_topics(&pool, workspace).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, keep.id);

    let published = list_published_topics(&pool, workspace, 50).await.unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, publish.id);
}

// ---------------------------------------------------------------------------
// Section 3: Preferences, feedback, intelligence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn preference_record_created_once_then_updated(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let user = Uuid::new_v4();

    assert!(insert_default_preferences(&pool, workspace, user).await.unwrap());
    assert!(
        !insert_default_preferences(&pool, workspace, user).await.unwrap(),
        "second insert must be a no-op"
    );

    save_user_preferences(
        &pool,
        workspace,
        user,
        Some("concise"),
        &serde_json::json!(["pricing", "onboarding"]),
        &serde_json::json!([]),
        &serde_json::json!([]),
    )
    .await
    .unwrap();

    let row = get_user_preferences(&pool, workspace, user).await.unwrap().unwrap();
    assert_eq!(row.communication_style.as_deref(), Some("concise"));
    assert_eq!(row.topics_of_interest.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_feedback_maps_to_duplicate_error(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();
    let user = Uuid::new_v4();

    insert_message_feedback(&pool, workspace, user, 77, true, None)
        .await
        .unwrap();

    let second = insert_message_feedback(&pool, workspace, user, 77, false, Some("wrong")).await;
    assert!(matches!(second, Err(DbError::Duplicate)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn intelligence_upsert_never_erases_existing_values(pool: sqlx::PgPool) {
    let workspace = Uuid::new_v4();

    upsert_workspace_intelligence(
        &pool,
        workspace,
        Some("SaaS"),
        Some("subscription"),
        Some(&serde_json::json!([{"goal": "grow ARR", "priority": 1}])),
        None,
        6,
    )
    .await
    .unwrap();

    // A later, weaker response omits everything except the analyzed count.
    upsert_workspace_intelligence(&pool, workspace, None, None, None, None, 9)
        .await
        .unwrap();

    let row = get_workspace_intelligence(&pool, workspace).await.unwrap().unwrap();
    assert_eq!(row.industry.as_deref(), Some("SaaS"));
    assert_eq!(row.business_model.as_deref(), Some("subscription"));
    assert_eq!(row.goals.as_array().unwrap().len(), 1);
    assert_eq!(row.conversations_analyzed, 9);
}
