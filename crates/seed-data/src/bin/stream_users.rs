//! Streams every row of `user_data` to stdout as JSON lines
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin stream_users
//! ```

use std::io::Write;

use futures::TryStreamExt;
use prodev::config::DbConfig;
use prodev::database::Database;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DbConfig::from_env();
    let db = Database::connect(&config).await?;

    let result = print_users(&db).await;
    db.close().await;

    match result {
        Ok(count) => {
            tracing::info!("Streamed {count} users");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Streaming failed: {e}");
            Err(e)
        }
    }
}

async fn print_users(db: &Database) -> anyhow::Result<usize> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0;

    let mut users = std::pin::pin!(db.stream_users());
    while let Some(user) = users.try_next().await? {
        serde_json::to_writer(&mut out, &user)?;
        writeln!(out)?;
        count += 1;
    }

    Ok(count)
}
