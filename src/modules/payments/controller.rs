use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::PaymentId;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreatePaymentDto, Payment, PaymentFilterParams, PaymentList};
use super::service::PaymentService;

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 404, description = "Registration or payment method not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn create_payment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePaymentDto>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment = PaymentService::create_payment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(
        ("course_registration_id" = Option<Uuid>, Query, description = "Only payments for this registration"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100)")
    ),
    responses((status = 200, description = "Payments", body = PaymentList)),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn list_payments(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(filters): Query<PaymentFilterParams>,
) -> Result<Json<PaymentList>, AppError> {
    let list = PaymentService::list_payments(&state.db, filters).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment", body = Payment),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn get_payment(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<PaymentId>,
) -> Result<Json<Payment>, AppError> {
    let payment = PaymentService::get_payment(&state.db, id).await?;
    Ok(Json(payment))
}
