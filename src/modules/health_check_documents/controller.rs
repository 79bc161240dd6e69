use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::HealthCheckDocumentId;

use crate::docs::ErrorResponse;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateHealthCheckDocumentDto, HealthCheckDocument, HealthCheckDocumentFilterParams,
    HealthCheckDocumentList, UpdateHealthCheckDocumentDto,
};
use super::service::HealthCheckDocumentService;

#[utoipa::path(
    post,
    path = "/api/health_check_document",
    request_body = CreateHealthCheckDocumentDto,
    responses(
        (status = 201, description = "Health check document recorded", body = HealthCheckDocument),
        (status = 404, description = "Student or health check schedule not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn create_health_check_document(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateHealthCheckDocumentDto>,
) -> Result<(StatusCode, Json<HealthCheckDocument>), AppError> {
    let document = HealthCheckDocumentService::create_document(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/api/health_check_document",
    params(
        ("student_id" = Option<Uuid>, Query, description = "Only documents for this student"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100)")
    ),
    responses((status = 200, description = "Health check documents", body = HealthCheckDocumentList)),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn list_health_check_documents(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(filters): Query<HealthCheckDocumentFilterParams>,
) -> Result<Json<HealthCheckDocumentList>, AppError> {
    let list = HealthCheckDocumentService::list_documents(&state.db, filters).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/health_check_document/{id}",
    params(("id" = Uuid, Path, description = "Health check document ID")),
    responses(
        (status = 200, description = "Health check document", body = HealthCheckDocument),
        (status = 404, description = "Health check document not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn get_health_check_document(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<HealthCheckDocumentId>,
) -> Result<Json<HealthCheckDocument>, AppError> {
    let document = HealthCheckDocumentService::get_document(&state.db, id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    put,
    path = "/api/health_check_document/{id}",
    params(("id" = Uuid, Path, description = "Health check document ID")),
    request_body = UpdateHealthCheckDocumentDto,
    responses(
        (status = 200, description = "Health check document updated", body = HealthCheckDocument),
        (status = 404, description = "Document or schedule not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn update_health_check_document(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<HealthCheckDocumentId>,
    ValidatedJson(dto): ValidatedJson<UpdateHealthCheckDocumentDto>,
) -> Result<Json<HealthCheckDocument>, AppError> {
    let document = HealthCheckDocumentService::update_document(&state.db, id, dto).await?;
    Ok(Json(document))
}

#[utoipa::path(
    delete,
    path = "/api/health_check_document/{id}",
    params(("id" = Uuid, Path, description = "Health check document ID")),
    responses(
        (status = 204, description = "Health check document deleted"),
        (status = 404, description = "Health check document not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn delete_health_check_document(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<HealthCheckDocumentId>,
) -> Result<StatusCode, AppError> {
    HealthCheckDocumentService::delete_document(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
