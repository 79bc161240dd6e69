//! Courses offered by the school.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::CourseStatus;
use crate::ids::{CourseId, LicenseTypeId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub course_name: String,
    pub license_type_id: LicenseTypeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_students: i32,
    pub current_students: i32,
    /// Price in minor currency units
    pub price: i64,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200, message = "course_name must be 1-200 characters"))]
    pub course_name: String,
    pub license_type_id: LicenseTypeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0, message = "max_students must not be negative"))]
    pub max_students: i32,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[serde(default)]
    pub status: CourseStatus,
}

/// Partial update; `None` (absent or `null`) leaves the column untouched.
#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200, message = "course_name must be 1-200 characters"))]
    pub course_name: Option<String>,
    pub license_type_id: Option<LicenseTypeId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "max_students must not be negative"))]
    pub max_students: Option<i32>,
    #[validate(range(min = 0, message = "current_students must not be negative"))]
    pub current_students: Option<i32>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: Option<i64>,
    pub status: Option<CourseStatus>,
}

impl UpdateCourseDto {
    pub fn is_empty(&self) -> bool {
        self.course_name.is_none()
            && self.license_type_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.max_students.is_none()
            && self.current_students.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }
}

/// Checks the date pair an update would leave behind.
///
/// The message names which side moved so the caller knows what to fix.
pub fn check_course_dates(
    existing: (NaiveDate, NaiveDate),
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), &'static str> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => Err("End date must be after start date"),
        (None, Some(end)) if end < existing.0 => {
            Err("End date must be after the existing start date")
        }
        (Some(start), None) if start > existing.1 => {
            Err("Start date must be before the existing end date")
        }
        _ => Ok(()),
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CourseList {
    pub items: Vec<Course>,
    pub total: i64,
}
