use sqlx::PgPool;

use drivewise_config::{CorsConfig, DatabaseConfig, JwtConfig};
use drivewise_db::{init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
        }
    }
}

/// Reads every configuration value, connects the pool and applies pending
/// migrations. Nothing reads the environment after this returns.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let db = init_db_pool(&database_config).await?;
    if database_config.run_migrations {
        run_migrations(&db).await?;
    }

    Ok(AppState::new(db, jwt_config, cors_config))
}
