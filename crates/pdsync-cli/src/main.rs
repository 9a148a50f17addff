mod store;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use store::PgListingStore;

#[derive(Debug, Parser)]
#[command(name = "pdsync-cli")]
#[command(about = "PDS listing feed importer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the feed at URL and synchronize the listings store.
    ///
    /// Prints the import status followed by one JSON object per rejected
    /// row for operator follow-up.
    Import { url: String },
    /// Run pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pdsync_core::load_app_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let pool = pdsync_db::connect_pool(
        &config.database_url,
        pdsync_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    match cli.command {
        Commands::Migrate => {
            pdsync_db::run_migrations(&pool).await?;
            tracing::info!("migrations up to date");
        }
        Commands::Import { url } => {
            pdsync_db::run_migrations(&pool).await?;

            let source = pdsync_feed::HttpFeedSource::new(
                config.feed_request_timeout_secs,
                &config.feed_user_agent,
            )?;
            let store = PgListingStore::new(pool.clone());

            let report = pdsync_feed::run_import(&url, &source, &store).await?;

            println!("status: {}", report.status);
            for row in &report.invalid_rows {
                println!("{}", serde_json::to_string(row)?);
            }
            if !report.invalid_rows.is_empty() {
                tracing::warn!(
                    rejected = report.invalid_rows.len(),
                    "some feed rows were rejected"
                );
            }
        }
    }

    Ok(())
}
