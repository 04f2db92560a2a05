use futures::{Stream, TryStreamExt, future};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{ConnectOptions, Connection, MySqlPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DbConfig;
use crate::errors::AppError;
use crate::models::{UserRecord, UserRow};

/// Table the seeder writes to.
pub const USER_TABLE: &str = "user_data";

/// Fixed layout of the `user_data` table.
pub const CREATE_USER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS user_data (
        id CHAR(36) PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        age DECIMAL(5,2) NOT NULL
    )
"#;

#[derive(Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Opens a single-connection pool on the configured database.
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        config.validate()?;

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(config.database_options())
            .await?;

        info!("Connected to {} database", config.database);
        Ok(Self::new(pool))
    }

    /// Creates the configured database on the server if it does not exist.
    ///
    /// Uses a short-lived server connection that is closed before returning,
    /// whether or not the statement succeeded.
    pub async fn create_database(config: &DbConfig) -> Result<(), AppError> {
        config.validate()?;

        let mut conn = config.server_options().connect().await?;
        debug!("Connected to MySQL server at {}:{}", config.host, config.port);

        let sql = format!("CREATE DATABASE IF NOT EXISTS `{}`", config.database);
        let created = sqlx::query(&sql).execute(&mut conn).await;
        let closed = conn.close().await;

        created?;
        closed?;

        info!(
            "Database '{}' created successfully or already exists",
            config.database
        );
        Ok(())
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Creates `user_data` if it is absent. Existing tables are left untouched.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_USER_TABLE).execute(&self.pool).await?;

        info!("Table '{USER_TABLE}' created successfully or already exists");
        Ok(())
    }

    pub async fn user_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_data WHERE id = ?")
            .bind(id.hyphenated().to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn insert_user(&self, user: &UserRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_data (id, name, email, age)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, email, age FROM user_data WHERE id = ?")
                .bind(id.hyphenated().to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(UserRecord::try_from).transpose()
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM user_data")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Streams every row of `user_data`, one record at a time.
    pub fn stream_users(&self) -> impl Stream<Item = Result<UserRecord, AppError>> + '_ {
        sqlx::query_as::<_, UserRow>("SELECT id, name, email, age FROM user_data")
            .fetch(&self.pool)
            .map_err(AppError::from)
            .and_then(|row| future::ready(UserRecord::try_from(row)))
    }

    /// Closes the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_table_layout() {
        let ddl: String = CREATE_USER_TABLE.split_whitespace().collect::<Vec<_>>().join(" ");

        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS user_data ("));
        assert!(ddl.contains("id CHAR(36) PRIMARY KEY"));
        assert!(ddl.contains("name VARCHAR(255) NOT NULL"));
        assert!(ddl.contains("email VARCHAR(255) NOT NULL"));
        assert!(ddl.contains("age DECIMAL(5,2) NOT NULL"));
    }
}
