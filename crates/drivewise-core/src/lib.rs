//! # Drivewise Core
//!
//! Foundational types shared by every Drivewise crate:
//!
//! - [`errors`]: [`AppError`] and its HTTP response conversion
//! - [`pagination`]: `skip`/`limit` query parameters and list envelopes
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: lenient deserializers for query strings
//!
//! # Example
//!
//! ```ignore
//! use drivewise_core::errors::AppError;
//! use drivewise_core::pagination::PaginationParams;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//!
//! let params = PaginationParams::default();
//! assert_eq!(params.limit(), 100);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::PaginationParams;
pub use password::{hash_password, verify_password};
