//! Persistence gateway for the cake store.
//!
//! Owns the PostgreSQL pool lifecycle and the `cakes` table. Repositories are
//! zero-sized structs whose async methods take `&PgPool` as the first
//! argument; each statement acquires a pooled connection for its own duration
//! and releases it on every exit path, including cancellation.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connection pool settings loaded from environment variables.
#[derive(Clone)]
pub struct PoolConfig {
    pub database_url: String,
    /// Upper bound on open connections (default: `20`).
    pub max_connections: u32,
    /// Idle connections kept warm (default: `0`).
    pub min_connections: u32,
    /// How long a statement may wait for a free connection (default: `5`).
    pub acquire_timeout_secs: u64,
    /// Idle connections are closed after this long (default: `600`).
    pub idle_timeout_secs: u64,
    /// Connections are recycled after this long (default: `1800`).
    pub max_lifetime_secs: u64,
}

impl PoolConfig {
    /// Load pool settings from the environment.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `20`       |
    /// | `DB_MIN_CONNECTIONS`      | `0`        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`        |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `600`      |
    /// | `DB_MAX_LIFETIME_SECS`    | `1800`     |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        Self {
            database_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 0),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 600),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", 1800),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid number")),
        Err(_) => default,
    }
}

/// Create a connection pool and open the first connection.
pub async fn create_pool(config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    config.pool_options().connect(&config.database_url).await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// True when `err` means a row could not be decoded into its model: a missing
/// column, a type mismatch, or a failing decoder.
pub fn is_scan_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}
