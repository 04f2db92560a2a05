//! Database integration for seeding user data.
//!
//! The [`Seeder`] makes sure the `user_data` table exists and inserts each
//! record only when its id is not already present. [`seed`] runs the whole
//! CSV-to-table pass with a scoped connection.

mod seeder;

pub use seeder::{InsertOutcome, SeedError, SeedReport, SeedSummary, Seeder, seed};
