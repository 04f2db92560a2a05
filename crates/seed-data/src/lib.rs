//! Seeds the `ALX_prodev.user_data` table from a CSV file.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let summary = seed(&config).await?;
//! println!("inserted {}, skipped {}", summary.inserted, summary.skipped);
//! ```
//!
//! Seeding is idempotent: rows whose id is already in the table are skipped,
//! so running the same file twice leaves the row count unchanged.

pub mod config;
pub mod db;
pub mod sources;

pub use prodev::models::UserRecord;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::UserRecord;
    pub use crate::config::SeedConfig;
    pub use crate::db::{InsertOutcome, SeedError, SeedReport, SeedSummary, Seeder, seed};
    pub use crate::sources::{CsvLoad, CsvLoader};
    pub use prodev::config::DbConfig;
    pub use prodev::database::Database;
}
