//! Database layer for the Movies API
//!
//! Provides:
//! - SeaORM entity models
//! - Repository traits and their SeaORM implementations
//! - Connection pool management
//! - Schema bootstrap

pub mod models;
mod repository;

pub use repository::{
    DbMovieRepository, DbRatingRepository, MovieDraft, MovieRepository, RatingDraft,
    RatingRepository,
};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use models::{MovieEntity, RatingEntity};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DbPool {
    /// Primary connection (for writes)
    pub primary: DatabaseConnection,

    /// Read replica connection (optional)
    pub replica: Option<DatabaseConnection>,
}

impl DbPool {
    /// Create a new database pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to primary database...");

        let primary = Database::connect(connect_options(&config.url, config))
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect to primary: {}", e)
            })?;

        // Connect to replica if configured
        let replica = if let Some(ref read_url) = config.read_url {
            info!("Connecting to read replica...");

            let replica_conn = Database::connect(connect_options(read_url, config))
                .await
                .map_err(|e| AppError::DatabaseConnection {
                    message: format!("Failed to connect to replica: {}", e)
                })?;

            Some(replica_conn)
        } else {
            None
        };

        info!("Database connections established");

        Ok(Self { primary, replica })
    }

    /// Get the connection for reads (replica if available, otherwise primary)
    pub fn read(&self) -> &DatabaseConnection {
        self.replica.as_ref().unwrap_or(&self.primary)
    }

    /// Get the connection for writes (always primary)
    pub fn write(&self) -> &DatabaseConnection {
        &self.primary
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.primary
            .ping()
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Primary ping failed: {}", e),
            })?;

        if let Some(ref replica) = self.replica {
            replica
                .ping()
                .await
                .map_err(|e| AppError::DatabaseConnection {
                    message: format!("Replica ping failed: {}", e),
                })?;
        }

        Ok(())
    }
}

fn connect_options(url: &str, config: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .sqlx_logging(true);
    opts
}

/// Create the `Movies` and `Ratings` tables if they do not exist yet.
///
/// Tables are derived from the entity definitions, so the `Ratings.MovieId`
/// foreign key carries `ON DELETE CASCADE`. `Movies` must be created first.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    let conn = pool.write();
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut movies = schema.create_table_from_entity(MovieEntity);
    movies.if_not_exists();
    conn.execute(backend.build(&movies)).await?;

    let mut ratings = schema.create_table_from_entity(RatingEntity);
    ratings.if_not_exists();
    conn.execute(backend.build(&ratings)).await?;

    info!(backend = ?backend, "Database schema ready");
    Ok(())
}

/// Fresh in-memory database with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    let pool = DbPool::new(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    ensure_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_in_memory() {
        let pool = test_pool().await;
        assert!(pool.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = test_pool().await;
        assert!(ensure_schema(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_read_falls_back_to_primary() {
        let pool = test_pool().await;
        assert!(pool.replica.is_none());
        assert!(std::ptr::eq(pool.read(), pool.write()));
    }
}
