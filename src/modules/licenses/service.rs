use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::{LicenseId, LicenseTypeId, StudentId};

use super::model::{CreateLicenseDto, License, LicenseList, UpdateLicenseDto};

const DUPLICATE_NUMBER: &str = "License number already exists";

pub struct LicenseService;

impl LicenseService {
    async fn ensure_references(
        db: &PgPool,
        student_id: Option<StudentId>,
        license_type_id: Option<LicenseTypeId>,
    ) -> Result<(), AppError> {
        if let Some(student_id) = student_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                    .bind(student_id)
                    .fetch_one(db)
                    .await?;
            if !exists {
                return Err(AppError::not_found(anyhow!("Student not found")));
            }
        }
        if let Some(license_type_id) = license_type_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM license_types WHERE id = $1)",
            )
            .bind(license_type_id)
            .fetch_one(db)
            .await?;
            if !exists {
                return Err(AppError::not_found(anyhow!("License type not found")));
            }
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "licenses"))]
    pub async fn create_license(db: &PgPool, dto: CreateLicenseDto) -> Result<License, AppError> {
        Self::ensure_references(db, Some(dto.student_id), Some(dto.license_type_id)).await?;

        let license = sqlx::query_as::<_, License>(
            r#"INSERT INTO licenses (license_number, license_type_id, student_id, expiration_date, status)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, license_number, license_type_id, student_id, expiration_date, status, created_at"#,
        )
        .bind(dto.license_number.trim())
        .bind(dto.license_type_id)
        .bind(dto.student_id)
        .bind(dto.expiration_date)
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NUMBER))?;

        info!(license.id = %license.id, "License issued");
        Ok(license)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "licenses"))]
    pub async fn list_licenses(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<LicenseList, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM licenses")
            .fetch_one(db)
            .await?;

        let items = sqlx::query_as::<_, License>(
            r#"SELECT id, license_number, license_type_id, student_id, expiration_date, status, created_at
               FROM licenses
               ORDER BY created_at, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.skip())
        .fetch_all(db)
        .await?;

        Ok(LicenseList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "licenses"))]
    pub async fn list_by_student(
        db: &PgPool,
        student_id: StudentId,
    ) -> Result<LicenseList, AppError> {
        let items = sqlx::query_as::<_, License>(
            r#"SELECT id, license_number, license_type_id, student_id, expiration_date, status, created_at
               FROM licenses WHERE student_id = $1
               ORDER BY created_at, id"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        let total = items.len() as i64;
        Ok(LicenseList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "licenses"))]
    pub async fn list_by_type(
        db: &PgPool,
        license_type_id: LicenseTypeId,
    ) -> Result<LicenseList, AppError> {
        let items = sqlx::query_as::<_, License>(
            r#"SELECT id, license_number, license_type_id, student_id, expiration_date, status, created_at
               FROM licenses WHERE license_type_id = $1
               ORDER BY created_at, id"#,
        )
        .bind(license_type_id)
        .fetch_all(db)
        .await?;

        let total = items.len() as i64;
        Ok(LicenseList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "licenses"))]
    pub async fn get_license(db: &PgPool, id: LicenseId) -> Result<License, AppError> {
        sqlx::query_as::<_, License>(
            r#"SELECT id, license_number, license_type_id, student_id, expiration_date, status, created_at
               FROM licenses WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("License not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "licenses"))]
    pub async fn get_by_number(db: &PgPool, license_number: &str) -> Result<License, AppError> {
        sqlx::query_as::<_, License>(
            r#"SELECT id, license_number, license_type_id, student_id, expiration_date, status, created_at
               FROM licenses WHERE license_number = $1"#,
        )
        .bind(license_number.trim())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("License not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "licenses"))]
    pub async fn update_license(
        db: &PgPool,
        id: LicenseId,
        dto: UpdateLicenseDto,
    ) -> Result<License, AppError> {
        let existing = Self::get_license(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }
        Self::ensure_references(db, None, dto.license_type_id).await?;

        let license = sqlx::query_as::<_, License>(
            r#"UPDATE licenses
               SET license_number = $1, license_type_id = $2, expiration_date = $3, status = $4
               WHERE id = $5
               RETURNING id, license_number, license_type_id, student_id, expiration_date, status, created_at"#,
        )
        .bind(
            dto.license_number
                .map(|n| n.trim().to_string())
                .unwrap_or(existing.license_number),
        )
        .bind(dto.license_type_id.unwrap_or(existing.license_type_id))
        .bind(dto.expiration_date.unwrap_or(existing.expiration_date))
        .bind(dto.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NUMBER))?;

        Ok(license)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "licenses"))]
    pub async fn delete_license(db: &PgPool, id: LicenseId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("License not found")));
        }
        Ok(())
    }
}
