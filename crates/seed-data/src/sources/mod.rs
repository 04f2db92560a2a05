//! Input sources for seed records.

pub mod csv_file;

pub use csv_file::{CsvError, CsvLoad, CsvLoader, RejectedRow};
