use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::AppError;
use drivewise_models::ids::{CourseId, HealthCheckScheduleId};

use super::model::{
    CreateHealthCheckScheduleDto, HealthCheckSchedule, HealthCheckScheduleFilterParams,
    HealthCheckScheduleList, UpdateHealthCheckScheduleDto,
};

pub struct HealthCheckScheduleService;

impl HealthCheckScheduleService {
    async fn ensure_course_exists(db: &PgPool, course_id: CourseId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(db)
                .await?;
        if !exists {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }
        Ok(())
    }

    fn ensure_future(scheduled_datetime: DateTime<Utc>) -> Result<(), AppError> {
        if scheduled_datetime <= Utc::now() {
            return Err(AppError::unprocessable(anyhow!(
                "scheduled_datetime must be in the future"
            )));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.operation = "INSERT", db.table = "health_check_schedules"))]
    pub async fn create_schedule(
        db: &PgPool,
        dto: CreateHealthCheckScheduleDto,
    ) -> Result<HealthCheckSchedule, AppError> {
        Self::ensure_future(dto.scheduled_datetime)?;
        Self::ensure_course_exists(db, dto.course_id).await?;

        let schedule = sqlx::query_as::<_, HealthCheckSchedule>(
            r#"INSERT INTO health_check_schedules (course_id, address, scheduled_datetime, description, status)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, course_id, address, scheduled_datetime, description, status, created_at, updated_at"#,
        )
        .bind(dto.course_id)
        .bind(&dto.address)
        .bind(dto.scheduled_datetime)
        .bind(&dto.description)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Health check schedule already exists"))?;

        info!(health_check.id = %schedule.id, "Health check scheduled");
        Ok(schedule)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "health_check_schedules"))]
    pub async fn list_schedules(
        db: &PgPool,
        filters: HealthCheckScheduleFilterParams,
    ) -> Result<HealthCheckScheduleList, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM health_check_schedules WHERE ($1::uuid IS NULL OR course_id = $1)",
        )
        .bind(filters.course_id)
        .fetch_one(db)
        .await?;

        let items = sqlx::query_as::<_, HealthCheckSchedule>(
            r#"SELECT id, course_id, address, scheduled_datetime, description, status, created_at, updated_at
               FROM health_check_schedules
               WHERE ($1::uuid IS NULL OR course_id = $1)
               ORDER BY created_at, id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(filters.course_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.skip())
        .fetch_all(db)
        .await?;

        Ok(HealthCheckScheduleList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "health_check_schedules"))]
    pub async fn get_schedule(
        db: &PgPool,
        id: HealthCheckScheduleId,
    ) -> Result<HealthCheckSchedule, AppError> {
        sqlx::query_as::<_, HealthCheckSchedule>(
            r#"SELECT id, course_id, address, scheduled_datetime, description, status, created_at, updated_at
               FROM health_check_schedules WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Health check schedule not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "health_check_schedules"))]
    pub async fn update_schedule(
        db: &PgPool,
        id: HealthCheckScheduleId,
        dto: UpdateHealthCheckScheduleDto,
    ) -> Result<HealthCheckSchedule, AppError> {
        let existing = Self::get_schedule(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }
        if let Some(scheduled_datetime) = dto.scheduled_datetime {
            Self::ensure_future(scheduled_datetime)?;
        }
        if let Some(course_id) = dto.course_id {
            Self::ensure_course_exists(db, course_id).await?;
        }

        let schedule = sqlx::query_as::<_, HealthCheckSchedule>(
            r#"UPDATE health_check_schedules
               SET course_id = $1, address = $2, scheduled_datetime = $3, description = $4,
                   status = $5, updated_at = NOW()
               WHERE id = $6
               RETURNING id, course_id, address, scheduled_datetime, description, status, created_at, updated_at"#,
        )
        .bind(dto.course_id.unwrap_or(existing.course_id))
        .bind(dto.address.unwrap_or(existing.address))
        .bind(dto.scheduled_datetime.unwrap_or(existing.scheduled_datetime))
        .bind(dto.description.or(existing.description))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Health check schedule already exists"))?;

        Ok(schedule)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "health_check_schedules"))]
    pub async fn delete_schedule(
        db: &PgPool,
        id: HealthCheckScheduleId,
    ) -> Result<HealthCheckSchedule, AppError> {
        let schedule = sqlx::query_as::<_, HealthCheckSchedule>(
            r#"DELETE FROM health_check_schedules WHERE id = $1
               RETURNING id, course_id, address, scheduled_datetime, description, status, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Health check schedule not found")))?;

        info!(health_check.id = %schedule.id, "Health check schedule deleted");
        Ok(schedule)
    }
}
