//! Background job scheduler.
//!
//! Registers the nightly hit-list reprioritization job and the weekly
//! business-context learning job. The core crates never schedule themselves;
//! this worker is the only place recurring learning is driven from.

use std::sync::Arc;

use neptune_core::AppConfig;
use neptune_oracle::OracleClient;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pool: PgPool,
    oracle: Arc<OracleClient>,
    config: Arc<AppConfig>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_reprioritize_job(&scheduler, pool.clone(), Arc::clone(&oracle), &config).await?;
    register_business_context_job(&scheduler, pool, oracle, &config).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the nightly reprioritization job.
///
/// Runs at 05:00 UTC by default; override with `NEPTUNE_REPRIORITIZE_CRON`.
async fn register_reprioritize_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    oracle: Arc<OracleClient>,
    config: &AppConfig,
) -> Result<(), JobSchedulerError> {
    let cron = config.reprioritize_cron.clone();
    let pool = Arc::new(pool);

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let oracle = Arc::clone(&oracle);

        Box::pin(async move {
            tracing::info!("scheduler: starting reprioritize run");
            run_reprioritize_job(&pool, oracle.as_ref()).await;
            tracing::info!("scheduler: reprioritize run complete");
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered reprioritize job");
    Ok(())
}

/// Rescore every workspace that has saved topics waiting.
///
/// Individual workspace failures are logged but do not abort the run.
async fn run_reprioritize_job(pool: &PgPool, oracle: &OracleClient) {
    let workspaces = match neptune_db::list_workspaces_with_saved_topics(pool).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: reprioritize failed to list workspaces");
            return;
        }
    };

    if workspaces.is_empty() {
        tracing::info!("scheduler: reprioritize: no workspaces with saved topics; skipping");
        return;
    }

    tracing::info!(count = workspaces.len(), "scheduler: reprioritize: processing workspaces");

    for workspace_id in workspaces {
        match neptune_scoring::reprioritize(pool, oracle, workspace_id).await {
            Ok(outcome) => {
                tracing::info!(
                    %workspace_id,
                    considered = outcome.topics_considered,
                    scored = outcome.topics_scored,
                    "scheduler: reprioritize: workspace complete"
                );
            }
            Err(e) => {
                tracing::error!(%workspace_id, error = %e, "scheduler: reprioritize: workspace failed");
            }
        }
    }
}

/// Register the weekly business-context learning job.
///
/// Runs Sunday 06:00 UTC by default; override with
/// `NEPTUNE_BUSINESS_CONTEXT_CRON`.
async fn register_business_context_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    oracle: Arc<OracleClient>,
    config: &AppConfig,
) -> Result<(), JobSchedulerError> {
    let cron = config.business_context_cron.clone();
    let pool = Arc::new(pool);

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let pool = Arc::clone(&pool);
        let oracle = Arc::clone(&oracle);

        Box::pin(async move {
            tracing::info!("scheduler: starting business-context run");
            run_business_context_job(&pool, oracle.as_ref()).await;
            tracing::info!("scheduler: business-context run complete");
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron = %cron, "scheduler: registered business-context job");
    Ok(())
}

/// Learn business context for every workspace with enough conversations.
async fn run_business_context_job(pool: &PgPool, oracle: &OracleClient) {
    // The per-workspace gate inside learn_business_context re-checks this;
    // filtering here just avoids pointless conversation reads.
    let workspaces = match neptune_db::list_workspaces_with_conversations(pool, 5).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: business-context failed to list workspaces");
            return;
        }
    };

    if workspaces.is_empty() {
        tracing::info!("scheduler: business-context: no eligible workspaces; skipping");
        return;
    }

    for workspace_id in workspaces {
        match neptune_learning::learn_business_context(pool, oracle, workspace_id).await {
            Ok(true) => {
                tracing::info!(%workspace_id, "scheduler: business-context: workspace updated");
            }
            Ok(false) => {
                tracing::info!(%workspace_id, "scheduler: business-context: nothing to record");
            }
            Err(e) => {
                tracing::error!(%workspace_id, error = %e, "scheduler: business-context: workspace failed");
            }
        }
    }
}
