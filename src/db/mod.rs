//! Database module providing connection management and queries.

pub mod alerts;
pub mod builds;
pub mod configurations;
pub mod dashboard;
pub mod metrics;
pub mod pipelines;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Database connection pool wrapper around SeaORM's connection.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the configured URL.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(config.database_url.clone());
        opts.max_connections(20)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(config.is_development());

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
