use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::AppError;
use drivewise_models::ids::{HealthCheckDocumentId, HealthCheckScheduleId, StudentId};

use super::model::{
    CreateHealthCheckDocumentDto, HealthCheckDocument, HealthCheckDocumentFilterParams,
    HealthCheckDocumentList, UpdateHealthCheckDocumentDto,
};

pub struct HealthCheckDocumentService;

impl HealthCheckDocumentService {
    async fn ensure_schedule_exists(
        db: &PgPool,
        health_check_id: HealthCheckScheduleId,
    ) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM health_check_schedules WHERE id = $1)",
        )
        .bind(health_check_id)
        .fetch_one(db)
        .await?;
        if !exists {
            return Err(AppError::not_found(anyhow!("Health check schedule not found")));
        }
        Ok(())
    }

    async fn ensure_student_exists(db: &PgPool, student_id: StudentId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(student_id)
                .fetch_one(db)
                .await?;
        if !exists {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, db.operation = "INSERT", db.table = "health_check_documents"))]
    pub async fn create_document(
        db: &PgPool,
        dto: CreateHealthCheckDocumentDto,
    ) -> Result<HealthCheckDocument, AppError> {
        Self::ensure_student_exists(db, dto.student_id).await?;
        Self::ensure_schedule_exists(db, dto.health_check_id).await?;

        let document = sqlx::query_as::<_, HealthCheckDocument>(
            r#"INSERT INTO health_check_documents (student_id, health_check_id, document, status)
               VALUES ($1, $2, $3, $4)
               RETURNING id, student_id, health_check_id, document, status, created_at, updated_at"#,
        )
        .bind(dto.student_id)
        .bind(dto.health_check_id)
        .bind(&dto.document)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Health check document already exists"))?;

        info!(document.id = %document.id, "Health check document created");
        Ok(document)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "health_check_documents"))]
    pub async fn list_documents(
        db: &PgPool,
        filters: HealthCheckDocumentFilterParams,
    ) -> Result<HealthCheckDocumentList, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM health_check_documents WHERE ($1::uuid IS NULL OR student_id = $1)",
        )
        .bind(filters.student_id)
        .fetch_one(db)
        .await?;

        let items = sqlx::query_as::<_, HealthCheckDocument>(
            r#"SELECT id, student_id, health_check_id, document, status, created_at, updated_at
               FROM health_check_documents
               WHERE ($1::uuid IS NULL OR student_id = $1)
               ORDER BY created_at, id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(filters.student_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.skip())
        .fetch_all(db)
        .await?;

        Ok(HealthCheckDocumentList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "health_check_documents"))]
    pub async fn get_document(
        db: &PgPool,
        id: HealthCheckDocumentId,
    ) -> Result<HealthCheckDocument, AppError> {
        sqlx::query_as::<_, HealthCheckDocument>(
            r#"SELECT id, student_id, health_check_id, document, status, created_at, updated_at
               FROM health_check_documents WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Health check document not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "health_check_documents"))]
    pub async fn find_latest_for_student(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<Option<HealthCheckDocument>, AppError> {
        let document = sqlx::query_as::<_, HealthCheckDocument>(
            r#"SELECT id, student_id, health_check_id, document, status, created_at, updated_at
               FROM health_check_documents
               WHERE student_id = $1
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#,
        )
        .bind(student_id)
        .fetch_optional(db)
        .await?;
        Ok(document)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "health_check_documents"))]
    pub async fn update_document(
        db: &PgPool,
        id: HealthCheckDocumentId,
        dto: UpdateHealthCheckDocumentDto,
    ) -> Result<HealthCheckDocument, AppError> {
        let existing = Self::get_document(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }
        if let Some(health_check_id) = dto.health_check_id {
            Self::ensure_schedule_exists(db, health_check_id).await?;
        }

        let document = sqlx::query_as::<_, HealthCheckDocument>(
            r#"UPDATE health_check_documents
               SET health_check_id = $1, document = $2, status = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING id, student_id, health_check_id, document, status, created_at, updated_at"#,
        )
        .bind(dto.health_check_id.unwrap_or(existing.health_check_id))
        .bind(dto.document.or(existing.document))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Health check document already exists"))?;

        Ok(document)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "health_check_documents"))]
    pub async fn delete_document(db: &PgPool, id: HealthCheckDocumentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM health_check_documents WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Health check document not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use drivewise_core::PaginationParams;
    use drivewise_models::enums::HealthDocumentStatus;

    async fn seed(pool: &PgPool) -> (StudentId, HealthCheckScheduleId) {
        let user_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO users (user_name, email, password) VALUES ('079201001234', 'a@b.dev', 'x') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let student_id = sqlx::query_scalar::<_, StudentId>(
            "INSERT INTO students (user_id) VALUES ($1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
        let license_type_id: uuid::Uuid = sqlx::query_scalar(
            r#"INSERT INTO license_types (type_name, age_requirement, health_requirements, training_duration, fee)
               VALUES ('B2', '18+', '', 90, 0) RETURNING id"#,
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let course_id: uuid::Uuid = sqlx::query_scalar(
            r#"INSERT INTO courses (course_name, license_type_id, start_date, end_date, max_students, price)
               VALUES ('B2 Weekend', $1, '2025-05-01', '2025-06-30', 30, 0) RETURNING id"#,
        )
        .bind(license_type_id)
        .fetch_one(pool)
        .await
        .unwrap();
        let schedule_id = sqlx::query_scalar::<_, HealthCheckScheduleId>(
            r#"INSERT INTO health_check_schedules (course_id, address, scheduled_datetime)
               VALUES ($1, 'Clinic', NOW() + INTERVAL '2 days') RETURNING id"#,
        )
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap();
        (student_id, schedule_id)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_update_and_filter(pool: PgPool) {
        let (student_id, schedule_id) = seed(&pool).await;
        let document = HealthCheckDocumentService::create_document(
            &pool,
            CreateHealthCheckDocumentDto {
                student_id,
                health_check_id: schedule_id,
                document: None,
                status: HealthDocumentStatus::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(document.status, HealthDocumentStatus::Registered);

        let updated = HealthCheckDocumentService::update_document(
            &pool,
            document.id,
            UpdateHealthCheckDocumentDto {
                document: Some("https://files.drivewise.dev/hc/1.pdf".to_string()),
                status: Some(HealthDocumentStatus::Checked),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, HealthDocumentStatus::Checked);
        assert_eq!(updated.health_check_id, schedule_id);

        let list = HealthCheckDocumentService::list_documents(
            &pool,
            HealthCheckDocumentFilterParams {
                student_id: Some(student_id.into_inner()),
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.items[0].id, document.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_schedule_is_not_found(pool: PgPool) {
        let (student_id, _) = seed(&pool).await;
        let err = HealthCheckDocumentService::create_document(
            &pool,
            CreateHealthCheckDocumentDto {
                student_id,
                health_check_id: HealthCheckScheduleId::new(),
                document: None,
                status: HealthDocumentStatus::default(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
