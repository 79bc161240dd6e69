//! Health-check appointment slots and the per-student documents recording
//! attendance at them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use drivewise_core::serde::deserialize_optional_uuid;

use crate::enums::{HealthCheckStatus, HealthDocumentStatus};
use crate::ids::{CourseId, HealthCheckDocumentId, HealthCheckScheduleId, StudentId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct HealthCheckSchedule {
    pub id: HealthCheckScheduleId,
    pub course_id: CourseId,
    pub address: String,
    pub scheduled_datetime: DateTime<Utc>,
    pub description: Option<String>,
    pub status: HealthCheckStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateHealthCheckScheduleDto {
    pub course_id: CourseId,
    #[validate(length(min = 1, max = 255, message = "address must be 1-255 characters"))]
    pub address: String,
    /// Must lie in the future
    pub scheduled_datetime: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: HealthCheckStatus,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateHealthCheckScheduleDto {
    pub course_id: Option<CourseId>,
    #[validate(length(min = 1, max = 255, message = "address must be 1-255 characters"))]
    pub address: Option<String>,
    pub scheduled_datetime: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<HealthCheckStatus>,
}

impl UpdateHealthCheckScheduleDto {
    pub fn is_empty(&self) -> bool {
        self.course_id.is_none()
            && self.address.is_none()
            && self.scheduled_datetime.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct HealthCheckScheduleFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: drivewise_core::PaginationParams,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthCheckScheduleList {
    pub items: Vec<HealthCheckSchedule>,
    pub total: i64,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct HealthCheckDocument {
    pub id: HealthCheckDocumentId,
    pub student_id: StudentId,
    pub health_check_id: HealthCheckScheduleId,
    /// Link to the uploaded evidence; empty until the check is done
    pub document: Option<String>,
    pub status: HealthDocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateHealthCheckDocumentDto {
    pub student_id: StudentId,
    pub health_check_id: HealthCheckScheduleId,
    #[validate(length(max = 2048))]
    pub document: Option<String>,
    #[serde(default)]
    pub status: HealthDocumentStatus,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateHealthCheckDocumentDto {
    pub health_check_id: Option<HealthCheckScheduleId>,
    #[validate(length(max = 2048))]
    pub document: Option<String>,
    pub status: Option<HealthDocumentStatus>,
}

impl UpdateHealthCheckDocumentDto {
    pub fn is_empty(&self) -> bool {
        self.health_check_id.is_none() && self.document.is_none() && self.status.is_none()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct HealthCheckDocumentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub student_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: drivewise_core::PaginationParams,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthCheckDocumentList {
    pub items: Vec<HealthCheckDocument>,
    pub total: i64,
}
