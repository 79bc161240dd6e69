//! License type catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::LicenseTypeId;

/// A category of driving license that courses train toward.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct LicenseType {
    pub id: LicenseTypeId,
    pub type_name: String,
    pub age_requirement: String,
    pub health_requirements: String,
    /// Training duration in days
    pub training_duration: i32,
    /// Fee in minor currency units
    pub fee: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateLicenseTypeDto {
    #[validate(length(min = 1, max = 50, message = "type_name must be 1-50 characters"))]
    pub type_name: String,
    #[validate(length(min = 1, max = 100, message = "age_requirement is required"))]
    pub age_requirement: String,
    #[validate(length(max = 1000))]
    pub health_requirements: String,
    #[validate(range(min = 1, message = "training_duration must be greater than 0"))]
    pub training_duration: i32,
    #[validate(range(min = 0, message = "fee must not be negative"))]
    pub fee: i64,
}

/// Partial update; `None` (absent or `null`) leaves the column untouched.
#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateLicenseTypeDto {
    #[validate(length(min = 1, max = 50, message = "type_name must be 1-50 characters"))]
    pub type_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "age_requirement is required"))]
    pub age_requirement: Option<String>,
    #[validate(length(max = 1000))]
    pub health_requirements: Option<String>,
    #[validate(range(min = 1, message = "training_duration must be greater than 0"))]
    pub training_duration: Option<i32>,
    #[validate(range(min = 0, message = "fee must not be negative"))]
    pub fee: Option<i64>,
}

impl UpdateLicenseTypeDto {
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none()
            && self.age_requirement.is_none()
            && self.health_requirements.is_none()
            && self.training_duration.is_none()
            && self.fee.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LicenseTypeList {
    pub items: Vec<LicenseType>,
    pub total: i64,
}
