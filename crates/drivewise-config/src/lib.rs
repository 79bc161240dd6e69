//! # Drivewise Config
//!
//! Configuration structures loaded once from environment variables at
//! startup and handed to the rest of the application through `AppState`.
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`database`]: connection string and pool sizing
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use drivewise_config::{CorsConfig, DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
