use std::sync::Arc;

use clap::{Parser, Subcommand};
use neptune_oracle::{OracleClient, OracleConfig};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "neptune-cli")]
#[command(about = "Neptune content-intelligence command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run pending database migrations.
    Migrate,
    /// Verify database connectivity.
    Health,
    /// Rescore every saved hit-list topic in a workspace.
    Reprioritize {
        #[arg(long)]
        workspace: Uuid,
    },
    /// Print the next-up report for a workspace.
    NextUp {
        #[arg(long)]
        workspace: Uuid,
    },
    /// Run business-context learning for a workspace once.
    LearnContext {
        #[arg(long)]
        workspace: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Arc::new(neptune_core::load_app_config()?);

    let pool_config = neptune_db::PoolConfig::from_app_config(&config);
    let pool = neptune_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Migrate => {
            let applied = neptune_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Health => {
            neptune_db::health_check(&pool).await?;
            println!("database: ok");
        }
        Commands::Reprioritize { workspace } => {
            let oracle = build_oracle(&config)?;
            let outcome = neptune_scoring::reprioritize(&pool, &oracle, workspace).await?;
            println!(
                "considered {} topic(s), persisted {} score(s)",
                outcome.topics_considered, outcome.topics_scored
            );
        }
        Commands::NextUp { workspace } => {
            print_next_up(&pool, workspace).await;
        }
        Commands::LearnContext { workspace } => {
            let oracle = build_oracle(&config)?;
            let analyzed =
                neptune_learning::learn_business_context(&pool, &oracle, workspace).await?;
            if analyzed {
                println!("workspace intelligence updated");
            } else {
                println!("nothing recorded (not enough signal yet)");
            }
        }
    }

    Ok(())
}

fn build_oracle(config: &neptune_core::AppConfig) -> anyhow::Result<OracleClient> {
    Ok(OracleClient::new(
        &config.oracle_api_key,
        OracleConfig {
            base_url: config.oracle_base_url.clone(),
            model: config.oracle_model.clone(),
            request_timeout_secs: config.oracle_request_timeout_secs,
            max_retries: config.oracle_max_retries,
            retry_backoff_base_ms: config.oracle_retry_backoff_base_ms,
        },
    )?)
}

async fn print_next_up(pool: &PgPool, workspace: Uuid) {
    let report = neptune_scoring::what_to_write_next(pool, workspace).await;

    println!("queued:             {}", report.total_queued);
    println!("in progress:        {}", report.in_progress);
    println!("recently published: {}", report.recently_published);
    if let Some(top) = &report.top_priority {
        match top.score {
            Some(score) => println!("top priority:       {} (score {score})", top.title),
            None => println!("top priority:       {} (unscored)", top.title),
        }
    }
    if let Some(recommendation) = &report.recommendation {
        println!("\n{recommendation}");
    }
}
