use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::PaymentMethodId;

use super::model::{
    CreatePaymentMethodDto, PaymentMethod, PaymentMethodList, UpdatePaymentMethodDto,
};

const DUPLICATE_METHOD: &str = "Payment method already exists";

pub struct PaymentMethodService;

impl PaymentMethodService {
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "payment_methods"))]
    pub async fn create_method(
        db: &PgPool,
        dto: CreatePaymentMethodDto,
    ) -> Result<PaymentMethod, AppError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "INSERT INTO payment_methods (method) VALUES ($1) RETURNING id, method, created_at",
        )
        .bind(dto.method.trim())
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_METHOD))?;

        info!(payment_method.id = %method.id, "Payment method created");
        Ok(method)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "payment_methods"))]
    pub async fn list_methods(
        db: &PgPool,
        pagination: PaginationParams,
    ) -> Result<PaymentMethodList, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payment_methods")
            .fetch_one(db)
            .await?;

        let payment_methods = sqlx::query_as::<_, PaymentMethod>(
            r#"SELECT id, method, created_at FROM payment_methods
               ORDER BY created_at, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(pagination.limit())
        .bind(pagination.skip())
        .fetch_all(db)
        .await?;

        Ok(PaymentMethodList {
            payment_methods,
            total,
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "payment_methods"))]
    pub async fn get_method(db: &PgPool, id: PaymentMethodId) -> Result<PaymentMethod, AppError> {
        sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, method, created_at FROM payment_methods WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Payment method not found")))
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "payment_methods"))]
    pub async fn update_method(
        db: &PgPool,
        id: PaymentMethodId,
        dto: UpdatePaymentMethodDto,
    ) -> Result<PaymentMethod, AppError> {
        let existing = Self::get_method(db, id).await?;
        let Some(method) = dto.method else {
            return Ok(existing);
        };

        sqlx::query_as::<_, PaymentMethod>(
            "UPDATE payment_methods SET method = $1 WHERE id = $2 RETURNING id, method, created_at",
        )
        .bind(method.trim())
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_METHOD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn dto(method: &str) -> CreatePaymentMethodDto {
        CreatePaymentMethodDto {
            method: method.to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list(pool: PgPool) {
        PaymentMethodService::create_method(&pool, dto("cash")).await.unwrap();
        PaymentMethodService::create_method(&pool, dto(" bank_transfer "))
            .await
            .unwrap();

        let list = PaymentMethodService::list_methods(&pool, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.payment_methods[1].method, "bank_transfer");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_is_conflict(pool: PgPool) {
        PaymentMethodService::create_method(&pool, dto("cash")).await.unwrap();
        let err = PaymentMethodService::create_method(&pool, dto("cash"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.public_message(), DUPLICATE_METHOD);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_renames(pool: PgPool) {
        let method = PaymentMethodService::create_method(&pool, dto("card")).await.unwrap();
        let renamed = PaymentMethodService::update_method(
            &pool,
            method.id,
            UpdatePaymentMethodDto {
                method: Some("credit_card".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.method, "credit_card");

        let err = PaymentMethodService::update_method(
            &pool,
            PaymentMethodId::new(),
            UpdatePaymentMethodDto::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
