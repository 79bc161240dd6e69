//! # Drivewise Auth
//!
//! Bearer token handling for the Drivewise API.
//!
//! - [`claims`]: the claim set carried by an access token
//! - [`jwt`]: token creation and verification (HS256)
//!
//! # Example
//!
//! ```ignore
//! use drivewise_auth::{create_access_token, verify_token};
//! use drivewise_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, "staff@drivewise.dev", "staff", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, "staff");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
