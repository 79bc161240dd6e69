use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::LicenseTypeId;

use super::model::{CreateLicenseTypeDto, LicenseType, LicenseTypeList, UpdateLicenseTypeDto};

const DUPLICATE_TYPE_NAME: &str = "License type with this name already exists";

pub struct LicenseTypeService;

impl LicenseTypeService {
    #[instrument(skip(db, dto), fields(license_type.name = %dto.type_name, db.operation = "INSERT", db.table = "license_types"))]
    pub async fn create_license_type(
        db: &PgPool,
        dto: CreateLicenseTypeDto,
    ) -> Result<LicenseType, AppError> {
        let license_type = sqlx::query_as::<_, LicenseType>(
            r#"INSERT INTO license_types (type_name, age_requirement, health_requirements, training_duration, fee)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, type_name, age_requirement, health_requirements, training_duration, fee, created_at, updated_at"#,
        )
        .bind(dto.type_name.trim())
        .bind(&dto.age_requirement)
        .bind(&dto.health_requirements)
        .bind(dto.training_duration)
        .bind(dto.fee)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_TYPE_NAME))?;

        info!(license_type.id = %license_type.id, "License type created");
        Ok(license_type)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "license_types"))]
    pub async fn list_license_types(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<LicenseTypeList, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM license_types")
            .fetch_one(db)
            .await?;

        let items = sqlx::query_as::<_, LicenseType>(
            r#"SELECT id, type_name, age_requirement, health_requirements, training_duration, fee, created_at, updated_at
               FROM license_types
               ORDER BY created_at, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.skip())
        .fetch_all(db)
        .await?;

        debug!(total, returned = items.len(), "License types fetched");
        Ok(LicenseTypeList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "license_types"))]
    pub async fn get_license_type(
        db: &PgPool,
        id: LicenseTypeId,
    ) -> Result<LicenseType, AppError> {
        sqlx::query_as::<_, LicenseType>(
            r#"SELECT id, type_name, age_requirement, health_requirements, training_duration, fee, created_at, updated_at
               FROM license_types WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("License type not found")))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "license_types"))]
    pub async fn update_license_type(
        db: &PgPool,
        id: LicenseTypeId,
        dto: UpdateLicenseTypeDto,
    ) -> Result<LicenseType, AppError> {
        let existing = Self::get_license_type(db, id).await?;
        if dto.is_empty() {
            return Ok(existing);
        }

        let license_type = sqlx::query_as::<_, LicenseType>(
            r#"UPDATE license_types
               SET type_name = $1, age_requirement = $2, health_requirements = $3,
                   training_duration = $4, fee = $5, updated_at = NOW()
               WHERE id = $6
               RETURNING id, type_name, age_requirement, health_requirements, training_duration, fee, created_at, updated_at"#,
        )
        .bind(dto.type_name.map(|n| n.trim().to_string()).unwrap_or(existing.type_name))
        .bind(dto.age_requirement.unwrap_or(existing.age_requirement))
        .bind(dto.health_requirements.unwrap_or(existing.health_requirements))
        .bind(dto.training_duration.unwrap_or(existing.training_duration))
        .bind(dto.fee.unwrap_or(existing.fee))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_TYPE_NAME))?;

        Ok(license_type)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "license_types"))]
    pub async fn delete_license_type(db: &PgPool, id: LicenseTypeId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM license_types WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict(anyhow!(
                        "License type is still used by courses or licenses"
                    ))
                }
                _ => AppError::database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("License type not found")));
        }

        info!(license_type.id = %id, "License type deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn dto(name: &str) -> CreateLicenseTypeDto {
        CreateLicenseTypeDto {
            type_name: name.to_string(),
            age_requirement: "18+".to_string(),
            health_requirements: "Class B medical".to_string(),
            training_duration: 90,
            fee: 15_000_000,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_type_name_is_conflict_and_first_survives(pool: PgPool) {
        let first = LicenseTypeService::create_license_type(&pool, dto("B2"))
            .await
            .unwrap();
        let err = LicenseTypeService::create_license_type(&pool, dto("B2"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let fetched = LicenseTypeService::get_license_type(&pool, first.id)
            .await
            .unwrap();
        assert_eq!(fetched, first);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_is_paginated_in_creation_order(pool: PgPool) {
        for name in ["A1", "B1", "B2", "C"] {
            LicenseTypeService::create_license_type(&pool, dto(name))
                .await
                .unwrap();
        }

        let page = LicenseTypeService::list_license_types(&pool, PaginationParams::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        let names: Vec<_> = page.items.iter().map(|t| t.type_name.as_str()).collect();
        assert_eq!(names, vec!["B1", "B2"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_partial_update_keeps_other_fields(pool: PgPool) {
        let created = LicenseTypeService::create_license_type(&pool, dto("B2"))
            .await
            .unwrap();

        let updated = LicenseTypeService::update_license_type(
            &pool,
            created.id,
            UpdateLicenseTypeDto {
                fee: Some(17_000_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.fee, 17_000_000);
        assert_eq!(updated.type_name, "B2");
        assert_eq!(updated.training_duration, 90);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_empty_update_is_a_no_op(pool: PgPool) {
        let created = LicenseTypeService::create_license_type(&pool, dto("B2"))
            .await
            .unwrap();
        let unchanged =
            LicenseTypeService::update_license_type(&pool, created.id, Default::default())
                .await
                .unwrap();
        assert_eq!(unchanged, created);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_missing_is_not_found(pool: PgPool) {
        let err = LicenseTypeService::delete_license_type(&pool, LicenseTypeId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
