use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::core::sql::Dialect;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Unsupported DB_DRIVER '{0}', expected 'mysql' or 'postgres'")]
    UnsupportedDriver(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub dialect: Dialect,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Only used by PostgreSQL
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Reads `key` through `lookup`, treating empty values as unset.
fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(value) => value,
        None => {
            tracing::debug!("{} not set, using default value", key);
            default.to_string()
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + ToString,
{
    let raw = var_or(lookup, key, &default.to_string());
    raw.parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional, production sets real variables
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Error loading .env file: {}", e);
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            app: AppConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
        })
    }
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var_or(lookup, "HOST", "0.0.0.0");
        let port = parse_var(lookup, "PORT", Self::DEFAULT_PORT)?;

        let cors_allowed_origins = var_or(lookup, "CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var(
            lookup,
            "REQUEST_TIMEOUT_SECS",
            Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let driver = var_or(lookup, "DB_DRIVER", "mysql");
        let dialect = driver
            .parse::<Dialect>()
            .map_err(|_| ConfigError::UnsupportedDriver(driver.clone()))?;

        Ok(Self {
            dialect,
            username: var_or(lookup, "DB_USERNAME", "root"),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            host: var_or(lookup, "DB_HOST", "localhost"),
            port: parse_var(lookup, "DB_PORT", dialect.default_port())?,
            database: var_or(lookup, "DB_DATABASE", "db_wilayah"),
            ssl_mode: var_or(lookup, "DB_SSLMODE", "require"),
            max_connections: parse_var(
                lookup,
                "DB_MAX_CONNECTIONS",
                Self::DEFAULT_MAX_CONNECTIONS,
            )?,
            min_connections: parse_var(
                lookup,
                "DB_MIN_CONNECTIONS",
                Self::DEFAULT_MIN_CONNECTIONS,
            )?,
            acquire_timeout_secs: parse_var(
                lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var(
                lookup,
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_var(
                lookup,
                "DB_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }

    /// Connection URL for the configured dialect. Credentials are percent-encoded.
    pub fn url(&self) -> String {
        let username = urlencoding::encode(&self.username);
        let password = urlencoding::encode(&self.password);
        match self.dialect {
            Dialect::MySql => format!(
                "mysql://{}:{}@{}:{}/{}",
                username, password, self.host, self.port, self.database
            ),
            Dialect::Postgres => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                username, password, self.host, self.port, self.database, self.ssl_mode
            ),
        }
    }

    /// Same as [`DatabaseConfig::url`] without credentials, safe for logs.
    pub fn redacted_target(&self) -> String {
        format!(
            "{} database '{}' at {}:{}",
            self.dialect, self.database, self.host, self.port
        )
    }
}
