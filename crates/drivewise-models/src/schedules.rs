//! Timetable entries: theory lessons, practice sessions and exams.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::ScheduleType;
use crate::ids::{CourseId, ExamId, InstructorId, LicenseTypeId, ScheduleId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Schedule {
    pub id: ScheduleId,
    pub course_id: Option<CourseId>,
    pub exam_id: Option<ExamId>,
    pub instructor_id: Option<InstructorId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub schedule_type: ScheduleType,
    pub max_students: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateScheduleDto {
    pub course_id: Option<CourseId>,
    pub exam_id: Option<ExamId>,
    pub instructor_id: Option<InstructorId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 255, message = "location must be 1-255 characters"))]
    pub location: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[validate(range(min = 0, message = "max_students must not be negative"))]
    pub max_students: i32,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdateScheduleDto {
    pub course_id: Option<CourseId>,
    pub exam_id: Option<ExamId>,
    pub instructor_id: Option<InstructorId>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 255, message = "location must be 1-255 characters"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub schedule_type: Option<ScheduleType>,
    #[validate(range(min = 0, message = "max_students must not be negative"))]
    pub max_students: Option<i32>,
}

impl UpdateScheduleDto {
    pub fn is_empty(&self) -> bool {
        self.course_id.is_none()
            && self.exam_id.is_none()
            && self.instructor_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.location.is_none()
            && self.schedule_type.is_none()
            && self.max_students.is_none()
    }
}

/// Rejects a window that would leave `end_time` at or before `start_time`.
pub fn check_schedule_times(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<(), &'static str> {
    if end_time <= start_time {
        return Err("End time must be after start time");
    }
    Ok(())
}

#[derive(Deserialize, Debug, Default)]
pub struct ScheduleWindowQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ScheduleWindowQuery {
    /// Resolves the inclusive window, defaulting each missing bound to the
    /// week containing `now` (Monday 00:00 through Sunday 23:59:59 UTC).
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>), &'static str> {
        let (week_start, week_end) = current_week(now);
        let start = self.start_time.unwrap_or(week_start);
        let end = self.end_time.unwrap_or(week_end);
        if end < start {
            return Err("end_time must not be before start_time");
        }
        Ok((start, end))
    }
}

fn current_week(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = now.date_naive() - Duration::days(i64::from(now.weekday().num_days_from_monday()));
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::seconds(1);
    (start, end)
}

/// Listing row: a schedule with its course and license type labels.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ScheduleListItem {
    pub id: ScheduleId,
    pub course_id: Option<CourseId>,
    pub course_name: Option<String>,
    pub license_type_id: Option<LicenseTypeId>,
    pub license_type_name: Option<String>,
    pub instructor_id: Option<InstructorId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub schedule_type: ScheduleType,
    pub max_students: i32,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ScheduleList {
    pub items: Vec<ScheduleListItem>,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseRef {
    pub id: CourseId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct InstructorRef {
    pub id: InstructorId,
    pub name: String,
}

/// Joined row backing [`ScheduleDetail`].
#[derive(FromRow, Debug)]
pub struct ScheduleDetailRow {
    pub id: ScheduleId,
    pub exam_id: Option<ExamId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[sqlx(rename = "type")]
    pub schedule_type: ScheduleType,
    pub max_students: i32,
    pub created_at: DateTime<Utc>,
    pub course_id: Option<CourseId>,
    pub course_name: Option<String>,
    pub instructor_id: Option<InstructorId>,
    pub instructor_name: Option<String>,
}

/// A schedule with its course and instructor named.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ScheduleDetail {
    pub id: ScheduleId,
    pub exam_id: Option<ExamId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub max_students: i32,
    pub created_at: DateTime<Utc>,
    pub course: Option<CourseRef>,
    pub instructor: Option<InstructorRef>,
}

impl From<ScheduleDetailRow> for ScheduleDetail {
    fn from(row: ScheduleDetailRow) -> Self {
        Self {
            id: row.id,
            exam_id: row.exam_id,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            schedule_type: row.schedule_type,
            max_students: row.max_students,
            created_at: row.created_at,
            course: row.course_id.map(|id| CourseRef {
                id,
                name: row.course_name.unwrap_or_default(),
            }),
            instructor: row.instructor_id.map(|id| InstructorRef {
                id,
                name: row.instructor_name.unwrap_or_default(),
            }),
        }
    }
}
