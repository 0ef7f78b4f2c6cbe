//! "What should I write next?": aggregate recommendations over the hit list.

use chrono::{DateTime, Duration, Utc};
use neptune_db::HitListTopicRow;
use sqlx::PgPool;
use uuid::Uuid;

/// How many top-scored topics feed the report.
const REPORT_WINDOW: i64 = 20;
/// A publish counts as "recent" for this many days.
const RECENT_PUBLISH_DAYS: i64 = 30;
/// More work-in-progress than this triggers the finish-first suggestion.
const WIP_LIMIT: usize = 2;

/// A topic reference small enough to show in a recommendation.
#[derive(Debug, Clone)]
pub struct TopicSummary {
    pub id: i64,
    pub title: String,
    pub score: Option<i32>,
}

/// The aggregate next-up report for one workspace.
#[derive(Debug, Clone, Default)]
pub struct NextUpReport {
    /// Highest-scored topic still waiting in `saved`. An in-progress item is
    /// never a "next" recommendation, whatever its score.
    pub top_priority: Option<TopicSummary>,
    pub total_queued: usize,
    pub in_progress: usize,
    pub recently_published: usize,
    pub recommendation: Option<String>,
}

/// Build the next-up report for a workspace.
///
/// Never fails: any storage error degrades to an empty report carrying a
/// generic "unable to analyze" recommendation.
pub async fn what_to_write_next(pool: &PgPool, workspace_id: Uuid) -> NextUpReport {
    match neptune_db::list_top_scored(pool, workspace_id, REPORT_WINDOW).await {
        Ok(rows) => build_report(&rows, Utc::now()),
        Err(e) => {
            tracing::error!(
                %workspace_id,
                error = %e,
                "next-up report failed to read hit list"
            );
            NextUpReport {
                recommendation: Some(
                    "Unable to analyze your hit list right now. Try again in a moment."
                        .to_string(),
                ),
                ..NextUpReport::default()
            }
        }
    }
}

/// Pure classification and recommendation logic, separated from storage so it
/// can be tested without a database.
fn build_report(rows: &[HitListTopicRow], now: DateTime<Utc>) -> NextUpReport {
    let recent_cutoff = now - Duration::days(RECENT_PUBLISH_DAYS);

    let total_queued = rows.iter().filter(|r| r.status == "saved").count();
    let in_progress = rows.iter().filter(|r| r.status == "in_progress").count();
    let recently_published = rows
        .iter()
        .filter(|r| r.status == "published" && r.updated_at >= recent_cutoff)
        .count();

    // Rows arrive ordered by score descending, so the first saved row is the
    // highest-scored queued topic.
    let top_priority = rows
        .iter()
        .find(|r| r.status == "saved")
        .map(|r| TopicSummary {
            id: r.id,
            title: r.title.clone(),
            score: r.priority_score,
        });

    let recommendation = if total_queued == 0 {
        Some("Your hit list is empty. Add a few content ideas and Neptune will rank them for you.".to_string())
    } else if in_progress > WIP_LIMIT {
        Some(format!(
            "You have {in_progress} pieces in progress. Consider finishing one of those before starting something new."
        ))
    } else if let Some(top) = &top_priority {
        match top.score {
            Some(score) => Some(format!(
                "Start with \"{}\". It is the highest-priority item in your queue (score {score}).",
                top.title
            )),
            None => Some(format!(
                "Start with \"{}\". It is next in your queue.",
                top.title
            )),
        }
    } else {
        None
    };

    NextUpReport {
        top_priority,
        total_queued,
        in_progress,
        recently_published,
        recommendation,
    }
}
