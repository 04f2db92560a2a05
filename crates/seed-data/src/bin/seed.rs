//! Default seed script - loads `user_data.csv` into `ALX_prodev.user_data`
//!
//! Run with:
//! ```
//! SEED_CSV_PATH=user_data.csv cargo run -p seed-data --bin seed
//! ```

use seed_data::config::SeedConfig;
use seed_data::db::seed;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();
    tracing::info!(
        "Seeding {} from {}",
        config.db.database,
        config.csv_path.display()
    );

    let summary = match seed(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            return Err(e.into());
        }
    };

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Loaded: {}", summary.loaded);
    tracing::info!("  Rejected: {}", summary.rejected);
    tracing::info!("  Inserted: {}", summary.inserted);
    tracing::info!("  Skipped: {}", summary.skipped);

    Ok(())
}
