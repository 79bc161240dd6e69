//! Students, exams and the per-course roster with scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use drivewise_core::serde::deserialize_optional_uuid;

use crate::enums::ExamType;
use crate::ids::{CourseId, CourseRegistrationId, ExamId, ExamResultId, StudentId, UserId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    pub user_id: UserId,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Exam {
    pub id: ExamId,
    pub course_id: CourseId,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub exam_type: ExamType,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct ExamResult {
    pub id: ExamResultId,
    pub exam_id: ExamId,
    pub student_id: StudentId,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Either score may be omitted; only the supplied ones are written.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateScoresDto {
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[validate(range(min = 0.0, max = 10.0, message = "theory_score must be between 0 and 10"))]
    pub theory_score: Option<f64>,
    #[validate(range(
        min = 0.0,
        max = 10.0,
        message = "practical_score must be between 0 and 10"
    ))]
    pub practical_score: Option<f64>,
}

impl UpdateScoresDto {
    /// The exams this update touches, paired with their new score.
    pub fn scores(&self) -> Vec<(ExamType, f64)> {
        [
            (ExamType::Theory, self.theory_score),
            (ExamType::Practice, self.practical_score),
        ]
        .into_iter()
        .filter_map(|(kind, score)| score.map(|s| (kind, s)))
        .collect()
    }
}

/// Absent `course_id` lists the roster across every course.
#[derive(Deserialize, Debug, Default)]
pub struct RosterQuery {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_id: Option<Uuid>,
}

/// One successfully registered student in a course, with any recorded scores.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct RosterEntry {
    pub student_id: StudentId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub full_name: Option<String>,
    pub course_id: CourseId,
    pub course_name: String,
    pub registration_id: CourseRegistrationId,
    pub theory_score: Option<f64>,
    pub practical_score: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RosterList {
    pub items: Vec<RosterEntry>,
    pub total: i64,
}
