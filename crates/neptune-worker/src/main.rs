mod scheduler;

use std::sync::Arc;

use neptune_oracle::{OracleClient, OracleConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(neptune_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = neptune_db::PoolConfig::from_app_config(&config);
    let pool = neptune_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = neptune_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let oracle = Arc::new(OracleClient::new(
        &config.oracle_api_key,
        OracleConfig {
            base_url: config.oracle_base_url.clone(),
            model: config.oracle_model.clone(),
            request_timeout_secs: config.oracle_request_timeout_secs,
            max_retries: config.oracle_max_retries,
            retry_backoff_base_ms: config.oracle_retry_backoff_base_ms,
        },
    )?);

    let _scheduler = scheduler::build_scheduler(pool, oracle, Arc::clone(&config)).await?;
    tracing::info!("worker started; waiting for scheduled jobs");

    shutdown_signal().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping worker");
}
