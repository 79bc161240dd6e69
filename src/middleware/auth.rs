use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejectionReason,
};

use drivewise_auth::{Claims, verify_token};
use drivewise_core::AppError;
use drivewise_models::ids::UserId;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => {
                        AppError::unauthorized("Missing authorization header")
                    }
                    _ => AppError::unauthorized("Invalid authorization header format"),
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn auth_user(sub: String) -> AuthUser {
        AuthUser(Claims {
            sub,
            email: "staff@drivewise.dev".to_string(),
            role: "staff".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_user_id() {
        let id = Uuid::new_v4();
        let user = auth_user(id.to_string());
        assert_eq!(user.user_id().unwrap().into_inner(), id);
        assert_eq!(user.role(), "staff");
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let err = auth_user("not-a-uuid".to_string()).user_id().unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
