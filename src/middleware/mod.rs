//! Request extractors for authentication and role gating.
//!
//! - [`auth`]: `AuthUser`, any valid bearer token
//! - [`role`]: `RequireAdmin` / `RequireStaff` and the `require_roles` gate
//!
//! Open endpoints take neither extractor.

pub mod auth;
pub mod role;
