//! Database seeding utilities.

use prodev::database::Database;
use prodev::errors::AppError;
use prodev::models::UserRecord;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SeedConfig;
use crate::sources::{CsvError, CsvLoader};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    App(AppError),
    #[error("Source error: {0}")]
    Source(#[from] CsvError),
}

impl From<AppError> for SeedError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(e) => Self::Database(e),
            other => Self::App(other),
        }
    }
}

/// What [`Seeder::insert_if_absent`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same id was already present.
    Skipped,
}

/// Counts from one pass of [`Seeder::seed_users`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

impl SeedReport {
    fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Totals for a full [`seed`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Valid rows read from the CSV.
    pub loaded: usize,
    /// Malformed rows left out of the load.
    pub rejected: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Database seeder for the `user_data` table.
pub struct Seeder {
    db: Database,
    progress_every: usize,
}

impl Seeder {
    /// Creates a new seeder over an open database.
    pub fn new(db: Database) -> Self {
        Self {
            db,
            progress_every: 50,
        }
    }

    /// Sets how often progress is logged during [`Seeder::seed_users`].
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every.max(1);
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Creates the target table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), SeedError> {
        self.db.ensure_schema().await?;
        Ok(())
    }

    /// Inserts the record unless a row with the same id already exists.
    pub async fn insert_if_absent(&self, user: &UserRecord) -> Result<InsertOutcome, SeedError> {
        if self.db.user_exists(user.id).await? {
            debug!("User with ID {} already exists, skipping", user.id);
            return Ok(InsertOutcome::Skipped);
        }

        self.db.insert_user(user).await?;
        debug!("Inserted user: {}", user.name);
        Ok(InsertOutcome::Inserted)
    }

    /// Seeds users one after another, skipping ids already in the table.
    pub async fn seed_users(&self, users: &[UserRecord]) -> Result<SeedReport, SeedError> {
        info!("Seeding {} users...", users.len());

        let mut report = SeedReport::default();
        for (i, user) in users.iter().enumerate() {
            report.record(self.insert_if_absent(user).await?);

            if (i + 1) % self.progress_every == 0 {
                info!("  Processed {}/{} users", i + 1, users.len());
            }
        }

        info!(
            "Seeded {} users ({} already present)",
            report.inserted, report.skipped
        );
        Ok(report)
    }

    /// Releases the database connection.
    pub async fn close(self) {
        self.db.close().await;
    }

    async fn seed_from_csv(&self, config: &SeedConfig) -> Result<SeedSummary, SeedError> {
        self.ensure_schema().await?;

        let load = CsvLoader::load_file(&config.csv_path)?;
        let mut summary = SeedSummary {
            loaded: load.records.len(),
            rejected: load.rejected.len(),
            ..SeedSummary::default()
        };

        if load.records.is_empty() {
            info!("No data to insert");
            return Ok(summary);
        }

        let report = self.seed_users(&load.records).await?;
        summary.inserted = report.inserted;
        summary.skipped = report.skipped;
        Ok(summary)
    }
}

/// Runs a complete seeding pass described by `config`.
///
/// Creates the database when configured to, connects, ensures the schema,
/// then loads and inserts the CSV rows. The connection is closed whether the
/// pass succeeds or fails.
pub async fn seed(config: &SeedConfig) -> Result<SeedSummary, SeedError> {
    if config.create_database {
        Database::create_database(&config.db).await?;
    }

    let db = Database::connect(&config.db).await?;
    let seeder = Seeder::new(db).with_progress_every(config.progress_every);

    let result = seeder.seed_from_csv(config).await;

    seeder.close().await;
    info!("{} database connection closed", config.db.database);

    result
}
