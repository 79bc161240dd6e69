//! Payment methods and the payments recorded against registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use drivewise_core::serde::deserialize_optional_uuid;

use crate::ids::{CourseRegistrationId, PaymentId, PaymentMethodId};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreatePaymentMethodDto {
    #[validate(length(min = 1, max = 50, message = "method must be 1-50 characters"))]
    pub method: String,
}

#[derive(Deserialize, Debug, Default, ToSchema, Validate)]
pub struct UpdatePaymentMethodDto {
    #[validate(length(min = 1, max = 50, message = "method must be 1-50 characters"))]
    pub method: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaymentMethodList {
    pub payment_methods: Vec<PaymentMethod>,
    pub total: i64,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Payment {
    pub id: PaymentId,
    pub payment_method_id: PaymentMethodId,
    pub course_registration_id: CourseRegistrationId,
    pub amount: f64,
    pub evidence: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreatePaymentDto {
    pub payment_method_id: PaymentMethodId,
    pub course_registration_id: CourseRegistrationId,
    #[validate(length(min = 1, max = 2048, message = "evidence is required"))]
    pub evidence: String,
    /// Defaults to 0
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PaymentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_registration_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: drivewise_core::PaginationParams,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaymentList {
    pub items: Vec<Payment>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_amount_is_optional() {
        let json = format!(
            r#"{{"payment_method_id":"{}","course_registration_id":"{}","evidence":"receipt.jpg"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let dto: CreatePaymentDto = serde_json::from_str(&json).unwrap();
        assert!(dto.amount.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let dto = CreatePaymentDto {
            payment_method_id: PaymentMethodId::new(),
            course_registration_id: CourseRegistrationId::new(),
            evidence: "receipt.jpg".to_string(),
            amount: Some(-5.0),
        };
        assert!(dto.validate().is_err());
    }
}
