use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::PaymentMethodId;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreatePaymentMethodDto, PaymentMethod, PaymentMethodList, UpdatePaymentMethodDto,
};
use super::service::PaymentMethodService;

#[utoipa::path(
    post,
    path = "/api/payment_method",
    request_body = CreatePaymentMethodDto,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 409, description = "Payment method already exists", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn create_payment_method(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreatePaymentMethodDto>,
) -> Result<(StatusCode, Json<PaymentMethod>), AppError> {
    let method = PaymentMethodService::create_method(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

#[utoipa::path(
    get,
    path = "/api/payment_method",
    params(PaginationParams),
    responses((status = 200, description = "Payment methods", body = PaymentMethodList)),
    tag = "Payments"
)]
pub async fn list_payment_methods(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaymentMethodList>, AppError> {
    let list = PaymentMethodService::list_methods(&state.db, pagination).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/payment_method/{id}",
    params(("id" = Uuid, Path, description = "Payment method ID")),
    responses(
        (status = 200, description = "Payment method", body = PaymentMethod),
        (status = 404, description = "Payment method not found", body = ErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn get_payment_method(
    State(state): State<AppState>,
    Path(id): Path<PaymentMethodId>,
) -> Result<Json<PaymentMethod>, AppError> {
    let method = PaymentMethodService::get_method(&state.db, id).await?;
    Ok(Json(method))
}

#[utoipa::path(
    put,
    path = "/api/payment_method/{id}",
    params(("id" = Uuid, Path, description = "Payment method ID")),
    request_body = UpdatePaymentMethodDto,
    responses(
        (status = 200, description = "Payment method updated", body = PaymentMethod),
        (status = 404, description = "Payment method not found", body = ErrorResponse),
        (status = 409, description = "Payment method already exists", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn update_payment_method(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<PaymentMethodId>,
    ValidatedJson(dto): ValidatedJson<UpdatePaymentMethodDto>,
) -> Result<Json<PaymentMethod>, AppError> {
    let method = PaymentMethodService::update_method(&state.db, id, dto).await?;
    Ok(Json(method))
}
