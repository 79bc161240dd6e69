//! Role gate.
//!
//! Every gated handler goes through [`require_roles`] with an explicit set of
//! [`UserRole`] variants, usually via one of the extractors below:
//!
//! ```rust,ignore
//! pub async fn delete_course(
//!     State(state): State<AppState>,
//!     RequireAdmin(_): RequireAdmin,
//!     Path(id): Path<CourseId>,
//! ) -> Result<Json<Course>, AppError> { /* ... */ }
//! ```
//!
//! A missing, malformed or expired token is a 401; a valid token whose role is
//! not in the set (or is not a known role at all) is a 403.

use axum::extract::FromRequestParts;
use drivewise_core::AppError;
use drivewise_models::enums::UserRole;

use crate::middleware::auth::AuthUser;

pub const ADMIN_ROLES: &[UserRole] = &[UserRole::Admin];
pub const STAFF_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Staff];

/// Admits the caller when their role is one of `allowed_roles` and returns
/// that role.
pub fn require_roles(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<UserRole, AppError> {
    let user_role: UserRole = auth_user
        .role()
        .parse()
        .map_err(|_| AppError::forbidden("Access denied. Unrecognised role"))?;

    if !allowed_roles.contains(&user_role) {
        let required = allowed_roles
            .iter()
            .map(UserRole::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {}",
            required
        )));
    }

    Ok(user_role)
}

macro_rules! require_role_set {
    ($(#[$meta:meta])* $name:ident, $roles:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<crate::state::AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                require_roles(&auth_user, $roles)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role_set!(
    /// Admits `admin` only.
    RequireAdmin,
    ADMIN_ROLES
);

require_role_set!(
    /// Admits `admin` and `staff`.
    RequireStaff,
    STAFF_ROLES
);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use drivewise_auth::Claims;

    fn user_with_role(role: &str) -> AuthUser {
        AuthUser(Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "someone@drivewise.dev".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_admin_passes_admin_gate() {
        assert_eq!(
            require_roles(&user_with_role("admin"), ADMIN_ROLES).unwrap(),
            UserRole::Admin
        );
    }

    #[test]
    fn test_staff_is_refused_by_admin_gate() {
        let err = require_roles(&user_with_role("staff"), ADMIN_ROLES).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.public_message(), "Access denied. Required roles: admin");
    }

    #[test]
    fn test_staff_gate_admits_admin_and_staff() {
        assert!(require_roles(&user_with_role("admin"), STAFF_ROLES).is_ok());
        assert!(require_roles(&user_with_role("staff"), STAFF_ROLES).is_ok());
        assert!(require_roles(&user_with_role("user"), STAFF_ROLES).is_err());
        assert!(require_roles(&user_with_role("teacher"), STAFF_ROLES).is_err());
    }

    #[test]
    fn test_unknown_role_is_forbidden() {
        let err = require_roles(&user_with_role("superuser"), STAFF_ROLES).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
