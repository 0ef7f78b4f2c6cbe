//! Offline unit tests for neptune-db pool configuration and row types.
//! These tests do not require a live database connection.

use neptune_core::{AppConfig, Environment};
use neptune_db::{HitListTopicRow, PoolConfig, UserPreferenceRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        oracle_api_key: "key".to_string(),
        oracle_base_url: "https://api.openai.com/v1".to_string(),
        oracle_model: "gpt-4o-mini".to_string(),
        oracle_request_timeout_secs: 60,
        oracle_max_retries: 2,
        oracle_retry_backoff_base_ms: 1000,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        reprioritize_cron: "0 0 5 * * *".to_string(),
        business_context_cron: "0 0 6 * * SUN".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`HitListTopicRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn hit_list_topic_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = HitListTopicRow {
        id: 1_i64,
        workspace_id: Uuid::new_v4(),
        title: "Pricing teardown".to_string(),
        description: "Compare our pricing page to the top three rivals".to_string(),
        why_it_works: "High purchase intent".to_string(),
        category: "comparison".to_string(),
        target_publish_date: None,
        status: "saved".to_string(),
        hit_list_position: 1_i32,
        priority_score: None,
        score_breakdown: None,
        scored_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.status, "saved");
    assert_eq!(row.hit_list_position, 1);
    assert!(row.priority_score.is_none());
    assert!(row.score_breakdown.is_none());
    assert!(row.scored_at.is_none());
}

/// Compile-time smoke test: confirm that [`UserPreferenceRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn user_preference_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = UserPreferenceRow {
        workspace_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        communication_style: Some("concise".to_string()),
        topics_of_interest: serde_json::json!(["pricing"]),
        frequent_questions: serde_json::json!([]),
        corrections: serde_json::json!([]),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.communication_style.as_deref(), Some("concise"));
    assert_eq!(row.topics_of_interest[0], "pricing");
}
