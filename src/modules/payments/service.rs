use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use drivewise_core::AppError;
use drivewise_models::ids::PaymentId;

use super::model::{CreatePaymentDto, Payment, PaymentFilterParams, PaymentList};

pub struct PaymentService;

impl PaymentService {
    #[instrument(skip(db, dto), fields(registration.id = %dto.course_registration_id, db.operation = "INSERT", db.table = "payments"))]
    pub async fn create_payment(db: &PgPool, dto: CreatePaymentDto) -> Result<Payment, AppError> {
        let registration_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM course_registrations WHERE id = $1)",
        )
        .bind(dto.course_registration_id)
        .fetch_one(db)
        .await?;
        if !registration_exists {
            return Err(AppError::not_found(anyhow!("Course registration not found")));
        }

        let method_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM payment_methods WHERE id = $1)",
        )
        .bind(dto.payment_method_id)
        .fetch_one(db)
        .await?;
        if !method_exists {
            return Err(AppError::not_found(anyhow!("Payment method not found")));
        }

        let payment = sqlx::query_as::<_, Payment>(
            r#"INSERT INTO payments (payment_method_id, course_registration_id, amount, evidence)
               VALUES ($1, $2, $3, $4)
               RETURNING id, payment_method_id, course_registration_id, amount, evidence, created_at, updated_at"#,
        )
        .bind(dto.payment_method_id)
        .bind(dto.course_registration_id)
        .bind(dto.amount.unwrap_or(0.0))
        .bind(&dto.evidence)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_write(e, "Payment already exists"))?;

        info!(payment.id = %payment.id, payment.amount = payment.amount, "Payment recorded");
        Ok(payment)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "payments"))]
    pub async fn list_payments(
        db: &PgPool,
        filters: PaymentFilterParams,
    ) -> Result<PaymentList, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payments WHERE ($1::uuid IS NULL OR course_registration_id = $1)",
        )
        .bind(filters.course_registration_id)
        .fetch_one(db)
        .await?;

        let items = sqlx::query_as::<_, Payment>(
            r#"SELECT id, payment_method_id, course_registration_id, amount, evidence, created_at, updated_at
               FROM payments
               WHERE ($1::uuid IS NULL OR course_registration_id = $1)
               ORDER BY created_at, id
               LIMIT $2 OFFSET $3"#,
        )
        .bind(filters.course_registration_id)
        .bind(filters.pagination.limit())
        .bind(filters.pagination.skip())
        .fetch_all(db)
        .await?;

        Ok(PaymentList { items, total })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "payments"))]
    pub async fn get_payment(db: &PgPool, id: PaymentId) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            r#"SELECT id, payment_method_id, course_registration_id, amount, evidence, created_at, updated_at
               FROM payments WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Payment not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use drivewise_core::PaginationParams;
    use drivewise_models::ids::{CourseRegistrationId, PaymentMethodId};

    async fn seed(pool: &PgPool) -> (CourseRegistrationId, PaymentMethodId) {
        let user_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO users (user_name, email, password) VALUES ('1', '1@placeholder', 'x') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let student_id: uuid::Uuid =
            sqlx::query_scalar("INSERT INTO students (user_id) VALUES ($1) RETURNING id")
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
        let registration_id = sqlx::query_scalar::<_, CourseRegistrationId>(
            r#"INSERT INTO course_registrations (student_id, course_id, method)
               VALUES ($1, $2, 'online') RETURNING id"#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap();
        let method_id = sqlx::query_scalar::<_, PaymentMethodId>(
            "INSERT INTO payment_methods (method) VALUES ('cash') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        (registration_id, method_id)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_amount_defaults_to_zero(pool: PgPool) {
        let (registration_id, method_id) = seed(&pool).await;
        let payment = PaymentService::create_payment(
            &pool,
            CreatePaymentDto {
                payment_method_id: method_id,
                course_registration_id: registration_id,
                evidence: "receipt.jpg".to_string(),
                amount: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(payment.amount, 0.0);

        let list = PaymentService::list_payments(
            &pool,
            PaymentFilterParams {
                course_registration_id: Some(registration_id.into_inner()),
                pagination: PaginationParams::default(),
            },
        )
        .await
        .unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.items[0], payment);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_references_are_not_found(pool: PgPool) {
        let (registration_id, method_id) = seed(&pool).await;

        let err = PaymentService::create_payment(
            &pool,
            CreatePaymentDto {
                payment_method_id: method_id,
                course_registration_id: CourseRegistrationId::new(),
                evidence: "receipt.jpg".to_string(),
                amount: Some(1_500_000.0),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.public_message(), "Course registration not found");

        let err = PaymentService::create_payment(
            &pool,
            CreatePaymentDto {
                payment_method_id: PaymentMethodId::new(),
                course_registration_id: registration_id,
                evidence: "receipt.jpg".to_string(),
                amount: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Payment method not found");
    }
}
