//! Database connection settings.
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DATABASE_RUN_MIGRATIONS`: apply embedded migrations at startup (default: true)

use anyhow::Context;
use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: crate::env_or("DATABASE_MAX_CONNECTIONS", 10),
            run_migrations: crate::env_or("DATABASE_RUN_MIGRATIONS", true),
        })
    }
}
