//! Connection configuration for the MySQL server.

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use tracing::warn;

use crate::errors::AppError;

/// Database the seeder targets unless configured otherwise.
pub const DEFAULT_DATABASE: &str = "ALX_prodev";

/// MySQL caps identifier length at 64 characters.
const MAX_IDENTIFIER_LEN: usize = 64;

/// Connection parameters for the MySQL server and target database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Database holding the `user_data` table.
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl DbConfig {
    /// Reads `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and
    /// `MYSQL_DATABASE`, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("MYSQL_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("MYSQL_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid MYSQL_PORT {port:?}, using {}", config.port),
            }
        }
        if let Some(user) = lookup("MYSQL_USER") {
            config.user = user;
        }
        if let Some(password) = lookup("MYSQL_PASSWORD") {
            config.password = password;
        }
        if let Some(database) = lookup("MYSQL_DATABASE") {
            config.database = database;
        }

        config
    }

    /// Returns a copy targeting a different database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Checks that `database` is safe to splice into DDL.
    pub fn validate(&self) -> Result<(), AppError> {
        let name = &self.database;
        let valid = !name.is_empty()
            && name.len() <= MAX_IDENTIFIER_LEN
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "database name {name:?} must match [A-Za-z0-9_]{{1,64}}"
            )))
        }
    }

    /// Options for a server-level connection with no database selected.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options for a connection to the configured database.
    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }
}
