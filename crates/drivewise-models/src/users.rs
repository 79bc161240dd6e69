//! User accounts and login contracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::UserRole;
use crate::ids::UserId;

/// A user account as returned by the API. Never carries the password hash.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Row used only by the login path.
#[derive(FromRow, Debug)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "user_name must be 1-100 characters"))]
    pub user_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "phone_number must be at most 20 characters"))]
    pub phone_number: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub role: UserRole,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_dto_validation() {
        let dto = CreateUserDto {
            user_name: "linh".to_string(),
            email: "linh@drivewise.dev".to_string(),
            phone_number: "0901234567".to_string(),
            password: "secret1".to_string(),
            role: UserRole::Staff,
        };
        assert!(dto.validate().is_ok());

        let bad = CreateUserDto {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            ..dto
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_user_serialization_has_no_password() {
        let user = User {
            id: UserId::new(),
            user_name: "linh".to_string(),
            email: "linh@drivewise.dev".to_string(),
            phone_number: String::new(),
            role: UserRole::User,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "user");
    }
}
