//! Pagination utilities for list endpoints.
//!
//! List endpoints accept `skip` and `limit` query parameters:
//! - `skip`: Number of rows to skip (default: 0, never negative)
//! - `limit`: Maximum number of rows to return (default: 100, clamped to [1, 100])
//!
//! and answer with an `{ "items": [...], "total": n }` envelope where
//! `total` counts every row matching the filters, not just the page.
//!
//! # Example
//!
//! ```ignore
//! use drivewise_core::pagination::PaginationParams;
//!
//! async fn list_courses(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<CourseList>, AppError> {
//!     let rows = fetch_courses(params.skip(), params.limit()).await?;
//!     // ...
//! }
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

/// Default and maximum page size.
pub const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for `skip`/`limit` pagination.
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of rows to skip (default: 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub skip: Option<i64>,
    /// Maximum number of rows to return (1-100, default: 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(MAX_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Returns the effective skip, never negative.
    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }
}
