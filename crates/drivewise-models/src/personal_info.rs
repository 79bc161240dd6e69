//! Identity and biographic data captured for a user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{PersonalInfoDocumentId, UserId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PersonalInfoDocument {
    pub id: PersonalInfoDocumentId,
    pub user_id: UserId,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub identity_number: String,
    pub identity_img_front: String,
    pub identity_img_back: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreatePersonalInfoDocumentDto {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 200, message = "full_name must be 1-200 characters"))]
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, max = 20, message = "gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 20, message = "identity_number must be 1-20 characters"))]
    pub identity_number: String,
    #[validate(length(min = 1, max = 2048, message = "identity_img_front is required"))]
    pub identity_img_front: String,
    #[validate(length(min = 1, max = 2048, message = "identity_img_back is required"))]
    pub identity_img_back: String,
    #[validate(length(min = 1, max = 2048, message = "avatar is required"))]
    pub avatar: String,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdatePersonalInfoDocumentDto {
    #[validate(length(min = 1, max = 200, message = "full_name must be 1-200 characters"))]
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(min = 1, max = 20))]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub identity_number: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub identity_img_front: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub identity_img_back: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub avatar: Option<String>,
}

impl UpdatePersonalInfoDocumentDto {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.address.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.identity_number.is_none()
            && self.identity_img_front.is_none()
            && self.identity_img_back.is_none()
            && self.avatar.is_none()
    }
}
