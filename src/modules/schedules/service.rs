use anyhow::anyhow;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::AppError;
use drivewise_models::ids::{CourseId, ExamId, InstructorId, ScheduleId};

use super::model::{
    CreateScheduleDto, Schedule, ScheduleDetail, ScheduleDetailRow, ScheduleList,
    ScheduleListItem, ScheduleWindowQuery, UpdateScheduleDto, check_schedule_times,
};

const SCHEDULE_COLUMNS: &str = "id, course_id, exam_id, instructor_id, start_time, end_time, location, type, max_students, created_at";

pub struct ScheduleService;

impl ScheduleService {
    async fn ensure_references(
        db: &PgPool,
        course_id: Option<CourseId>,
        instructor_id: Option<InstructorId>,
        exam_id: Option<ExamId>,
    ) -> Result<(), AppError> {
        if let Some(course_id) = course_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                    .bind(course_id)
                    .fetch_one(db)
                    .await?;
            if !exists {
                return Err(AppError::not_found(anyhow!("Course not found")));
            }
        }
        if let Some(instructor_id) = instructor_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM instructors WHERE id = $1)",
            )
            .bind(instructor_id)
            .fetch_one(db)
            .await?;
            if !exists {
                return Err(AppError::not_found(anyhow!("Instructor not found")));
            }
        }
        if let Some(exam_id) = exam_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM exams WHERE id = $1)")
                    .bind(exam_id)
                    .fetch_one(db)
                    .await?;
            if !exists {
                return Err(AppError::not_found(anyhow!("Exam not found")));
            }
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "schedules"))]
    pub async fn create_schedule(
        db: &PgPool,
        dto: CreateScheduleDto,
    ) -> Result<ScheduleDetail, AppError> {
        check_schedule_times(dto.start_time, dto.end_time)
            .map_err(|e| AppError::unprocessable(anyhow!(e)))?;
        Self::ensure_references(db, dto.course_id, dto.instructor_id, dto.exam_id).await?;

        let id = sqlx::query_scalar::<_, ScheduleId>(
            r#"INSERT INTO schedules
                   (course_id, exam_id, instructor_id, start_time, end_time, location, type, max_students)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id"#,
        )
        .bind(dto.course_id)
        .bind(dto.exam_id)
        .bind(dto.instructor_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .bind(dto.location.trim())
        .bind(dto.schedule_type)
        .bind(dto.max_students)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Schedule already exists"))?;

        info!(schedule.id = %id, schedule.kind = %dto.schedule_type, "Schedule created");
        Self::get_schedule(db, id).await
    }

    /// Schedules starting inside the window, earliest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "schedules"))]
    pub async fn list_schedules(
        db: &PgPool,
        window: ScheduleWindowQuery,
    ) -> Result<ScheduleList, AppError> {
        let (start, end) = window
            .resolve(Utc::now())
            .map_err(|e| AppError::unprocessable(anyhow!(e)))?;

        let items = sqlx::query_as::<_, ScheduleListItem>(
            r#"SELECT s.id, s.course_id, c.course_name, lt.id AS license_type_id,
                      lt.type_name AS license_type_name, s.instructor_id,
                      s.start_time, s.end_time, s.location, s.type, s.max_students
               FROM schedules s
               LEFT JOIN courses c ON c.id = s.course_id
               LEFT JOIN license_types lt ON lt.id = c.license_type_id
               WHERE s.start_time >= $1 AND s.start_time <= $2
               ORDER BY s.start_time, s.id"#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        let total = items.len() as i64;
        Ok(ScheduleList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "schedules"))]
    pub async fn get_schedule(db: &PgPool, id: ScheduleId) -> Result<ScheduleDetail, AppError> {
        let row = sqlx::query_as::<_, ScheduleDetailRow>(
            r#"SELECT s.id, s.exam_id, s.start_time, s.end_time, s.location, s.type,
                      s.max_students, s.created_at,
                      c.id AS course_id, c.course_name,
                      i.id AS instructor_id, u.user_name AS instructor_name
               FROM schedules s
               LEFT JOIN courses c ON c.id = s.course_id
               LEFT JOIN instructors i ON i.id = s.instructor_id
               LEFT JOIN users u ON u.id = i.user_id
               WHERE s.id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Schedule not found")))?;

        Ok(row.into())
    }

    async fn get_row(db: &PgPool, id: ScheduleId) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Schedule not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "schedules"))]
    pub async fn update_schedule(
        db: &PgPool,
        id: ScheduleId,
        dto: UpdateScheduleDto,
    ) -> Result<ScheduleDetail, AppError> {
        let existing = Self::get_row(db, id).await?;
        if dto.is_empty() {
            return Self::get_schedule(db, id).await;
        }

        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);
        check_schedule_times(start_time, end_time)
            .map_err(|e| AppError::unprocessable(anyhow!(e)))?;
        Self::ensure_references(db, dto.course_id, dto.instructor_id, dto.exam_id).await?;

        sqlx::query(
            r#"UPDATE schedules
               SET course_id = $1, exam_id = $2, instructor_id = $3, start_time = $4,
                   end_time = $5, location = $6, type = $7, max_students = $8
               WHERE id = $9"#,
        )
        .bind(dto.course_id.or(existing.course_id))
        .bind(dto.exam_id.or(existing.exam_id))
        .bind(dto.instructor_id.or(existing.instructor_id))
        .bind(start_time)
        .bind(end_time)
        .bind(
            dto.location
                .map(|l| l.trim().to_string())
                .unwrap_or(existing.location),
        )
        .bind(dto.schedule_type.unwrap_or(existing.schedule_type))
        .bind(dto.max_students.unwrap_or(existing.max_students))
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| AppError::from_write(e, "Schedule already exists"))?;

        Self::get_schedule(db, id).await
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "schedules"))]
    pub async fn delete_schedule(db: &PgPool, id: ScheduleId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Schedule not found")));
        }
        Ok(())
    }
}
