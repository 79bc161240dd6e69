use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::{CourseId, LicenseTypeId};

use super::model::{Course, CourseList, CreateCourseDto, UpdateCourseDto, check_course_dates};

pub struct CourseService;

impl CourseService {
    async fn ensure_license_type_exists(
        db: &PgPool,
        license_type_id: LicenseTypeId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM license_types WHERE id = $1)",
        )
        .bind(license_type_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow!("License type not found")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(course.name = %dto.course_name, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        if dto.end_date < dto.start_date {
            return Err(AppError::unprocessable(anyhow!(
                "End date must be after start date"
            )));
        }
        Self::ensure_license_type_exists(db, dto.license_type_id).await?;

        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (course_name, license_type_id, start_date, end_date, max_students, price, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id, course_name, license_type_id, start_date, end_date, max_students,
                         current_students, price, status, created_at, updated_at"#,
        )
        .bind(dto.course_name.trim())
        .bind(dto.license_type_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(dto.max_students)
        .bind(dto.price)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Course already exists"))?;

        info!(course.id = %course.id, "Course created");
        Ok(course)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn list_courses(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<CourseList, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await?;

        let items = sqlx::query_as::<_, Course>(
            r#"SELECT id, course_name, license_type_id, start_date, end_date, max_students,
                      current_students, price, status, created_at, updated_at
               FROM courses
               ORDER BY created_at, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.skip())
        .fetch_all(db)
        .await?;

        debug!(total, returned = items.len(), "Courses fetched");
        Ok(CourseList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"SELECT id, course_name, license_type_id, start_date, end_date, max_students,
                      current_students, price, status, created_at, updated_at
               FROM courses WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    /// Applies the supplied fields only. Date and capacity rules are checked
    /// against the row as it would look after the update.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }

        check_course_dates(
            (existing.start_date, existing.end_date),
            dto.start_date,
            dto.end_date,
        )
        .map_err(|msg| AppError::unprocessable(anyhow!(msg)))?;

        let max_students = dto.max_students.unwrap_or(existing.max_students);
        let current_students = dto.current_students.unwrap_or(existing.current_students);
        if current_students > max_students {
            return Err(AppError::unprocessable(anyhow!(
                "current_students must not exceed max_students"
            )));
        }

        if let Some(license_type_id) = dto.license_type_id {
            Self::ensure_license_type_exists(db, license_type_id).await?;
        }

        let course = sqlx::query_as::<_, Course>(
            r#"UPDATE courses
               SET course_name = $1, license_type_id = $2, start_date = $3, end_date = $4,
                   max_students = $5, current_students = $6, price = $7, status = $8,
                   updated_at = NOW()
               WHERE id = $9
               RETURNING id, course_name, license_type_id, start_date, end_date, max_students,
                         current_students, price, status, created_at, updated_at"#,
        )
        .bind(
            dto.course_name
                .map(|n| n.trim().to_string())
                .unwrap_or(existing.course_name),
        )
        .bind(dto.license_type_id.unwrap_or(existing.license_type_id))
        .bind(dto.start_date.unwrap_or(existing.start_date))
        .bind(dto.end_date.unwrap_or(existing.end_date))
        .bind(max_students)
        .bind(current_students)
        .bind(dto.price.unwrap_or(existing.price))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Course already exists"))?;

        Ok(course)
    }

    /// Removes the course and hands back the deleted row.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(db: &PgPool, id: CourseId) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"DELETE FROM courses WHERE id = $1
               RETURNING id, course_name, license_type_id, start_date, end_date, max_students,
                         current_students, price, status, created_at, updated_at"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;

        info!(course.id = %course.id, "Course deleted");
        Ok(course)
    }
}
