//! Issued driving licenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::LicenseStatus;
use crate::ids::{LicenseId, LicenseTypeId, StudentId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct License {
    pub id: LicenseId,
    pub license_number: String,
    pub license_type_id: LicenseTypeId,
    pub student_id: StudentId,
    pub expiration_date: DateTime<Utc>,
    pub status: LicenseStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateLicenseDto {
    #[validate(length(min = 1, max = 50, message = "license_number must be 1-50 characters"))]
    pub license_number: String,
    pub license_type_id: LicenseTypeId,
    pub student_id: StudentId,
    pub expiration_date: DateTime<Utc>,
    #[serde(default)]
    pub status: LicenseStatus,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateLicenseDto {
    #[validate(length(min = 1, max = 50, message = "license_number must be 1-50 characters"))]
    pub license_number: Option<String>,
    pub license_type_id: Option<LicenseTypeId>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub status: Option<LicenseStatus>,
}

impl UpdateLicenseDto {
    pub fn is_empty(&self) -> bool {
        self.license_number.is_none()
            && self.license_type_id.is_none()
            && self.expiration_date.is_none()
            && self.status.is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LicenseList {
    pub items: Vec<License>,
    pub total: i64,
}
