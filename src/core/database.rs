use std::time::Duration;

use sqlx::any::{AnyPoolOptions, install_default_drivers};
use sqlx::{AnyPool, Connection};
use thiserror::Error;

use crate::core::config::DatabaseConfig;
use crate::core::sql::{self, Dialect};

/// Failures that prevent the service from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Error connecting to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Error pinging database: {0}")]
    Ping(#[source] sqlx::Error),

    #[error("Table {table} does not exist: {source}")]
    MissingTable {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// The process-wide pool together with the dialect its SQL must be written in
#[derive(Debug, Clone)]
pub struct Database {
    pub pool: AnyPool,
    pub dialect: Dialect,
}

pub async fn connect(config: &DatabaseConfig) -> Result<Database, StartupError> {
    install_default_drivers();

    tracing::info!("Attempting to connect to {}", config.redacted_target());
    let pool = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url())
        .await
        .map_err(StartupError::Connect)?;

    let mut conn = pool.acquire().await.map_err(StartupError::Ping)?;
    conn.ping().await.map_err(StartupError::Ping)?;

    tracing::info!("Successfully connected to the database");
    Ok(Database {
        pool,
        dialect: config.dialect,
    })
}

/// Queries each table so a broken schema fails at startup rather than per request.
pub async fn verify_tables(db: &Database, tables: &[&'static str]) -> Result<(), StartupError> {
    tracing::info!("Checking if required tables exist...");
    for &table in tables {
        let query = sql::table_exists_query(db.dialect, table);
        query
            .as_query()
            .fetch_optional(&db.pool)
            .await
            .map_err(|source| StartupError::MissingTable { table, source })?;
        tracing::debug!("Table {} exists", table);
    }
    tracing::info!("All required tables exist");
    Ok(())
}
