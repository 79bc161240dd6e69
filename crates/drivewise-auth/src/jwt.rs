//! Access token creation and verification.
//!
//! Tokens are HS256-signed with the secret from [`JwtConfig`] and expire
//! after `access_token_expiry` seconds. Verification checks signature and
//! expiry; an expired token and a malformed one produce different 401
//! messages so clients can tell when to log in again.

use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use drivewise_config::JwtConfig;
use drivewise_core::AppError;

use crate::claims::Claims;

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set. Also used by tests to forge expired tokens.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token expired"),
        _ => AppError::unauthorized("Invalid token"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret-for-unit-tests", 3600)
    }

    #[test]
    fn test_create_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "admin@drivewise.dev", "admin", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "admin@drivewise.dev");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_access_token(Uuid::new_v4(), "a@b.dev", "user", &config()).unwrap();
        let err = verify_token(&token, &JwtConfig::new("other-secret", 3600)).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.dev".to_string(),
            role: "admin".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        let err = verify_token(&token, &config()).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), "Token expired");
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = verify_token("not.a.jwt", &config()).unwrap_err();
        assert_eq!(err.public_message(), "Invalid token");
    }
}
