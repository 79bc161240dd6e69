//! # Drivewise DB
//!
//! PostgreSQL pool initialisation and the embedded schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use drivewise_config::DatabaseConfig;
//! use drivewise_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! if config.run_migrations {
//!     run_migrations(&pool).await?;
//! }
//! ```

use std::time::Duration;

use drivewise_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Creates the connection pool.
///
/// Each request checks a connection out of the pool for the duration of
/// its handler; the pool gets it back when the handler returns, whatever
/// the outcome.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies the migrations under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
