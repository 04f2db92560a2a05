//! Configuration types for seeding.

use std::path::PathBuf;

use prodev::config::DbConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// CSV file with `id,name,email,age` columns and a header row.
    pub csv_path: PathBuf,

    /// Server and database to seed.
    pub db: DbConfig,

    /// Whether to run `CREATE DATABASE IF NOT EXISTS` before connecting.
    pub create_database: bool,

    /// Log progress every this many records.
    pub progress_every: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("user_data.csv"),
            db: DbConfig::default(),
            create_database: true,
            progress_every: 50,
        }
    }
}

impl SeedConfig {
    /// Builds the configuration from `SEED_*` and `MYSQL_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SeedConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            db: DbConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(path) = lookup("SEED_CSV_PATH") {
            config.csv_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup("SEED_CREATE_DATABASE") {
            match parse_flag(&flag) {
                Some(value) => config.create_database = value,
                None => warn!("Ignoring invalid SEED_CREATE_DATABASE {flag:?}"),
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeedConfig::default();
        assert_eq!(config.csv_path, PathBuf::from("user_data.csv"));
        assert_eq!(config.db.database, "ALX_prodev");
        assert!(config.create_database);
        assert_eq!(config.progress_every, 50);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = SeedConfig::from_lookup(|key| match key {
            "SEED_CSV_PATH" => Some("/data/users.csv".to_string()),
            "SEED_CREATE_DATABASE" => Some("no".to_string()),
            "MYSQL_DATABASE" => Some("staging".to_string()),
            _ => None,
        });

        assert_eq!(config.csv_path, PathBuf::from("/data/users.csv"));
        assert!(!config.create_database);
        assert_eq!(config.db.database, "staging");
    }

    #[test]
    fn test_invalid_flag_keeps_default() {
        let config = SeedConfig::from_lookup(|key| {
            (key == "SEED_CREATE_DATABASE").then(|| "maybe".to_string())
        });
        assert!(config.create_database);
    }
}
