use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::LicenseTypeId;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateLicenseTypeDto, LicenseType, LicenseTypeList, UpdateLicenseTypeDto};
use super::service::LicenseTypeService;

#[utoipa::path(
    post,
    path = "/api/license_type",
    request_body = CreateLicenseTypeDto,
    responses(
        (status = 201, description = "License type created", body = LicenseType),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 409, description = "Duplicate type name", body = ErrorResponse)
    ),
    tag = "License Types",
    security(("bearer_auth" = []))
)]
pub async fn create_license_type(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateLicenseTypeDto>,
) -> Result<(StatusCode, Json<LicenseType>), AppError> {
    let license_type = LicenseTypeService::create_license_type(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(license_type)))
}

#[utoipa::path(
    get,
    path = "/api/license_type",
    params(PaginationParams),
    responses((status = 200, description = "License types", body = LicenseTypeList)),
    tag = "License Types"
)]
pub async fn list_license_types(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<LicenseTypeList>, AppError> {
    let list = LicenseTypeService::list_license_types(&state.db, pagination).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/license_type/{id}",
    params(("id" = Uuid, Path, description = "License type ID")),
    responses(
        (status = 200, description = "License type", body = LicenseType),
        (status = 404, description = "License type not found", body = ErrorResponse)
    ),
    tag = "License Types"
)]
pub async fn get_license_type(
    State(state): State<AppState>,
    Path(id): Path<LicenseTypeId>,
) -> Result<Json<LicenseType>, AppError> {
    let license_type = LicenseTypeService::get_license_type(&state.db, id).await?;
    Ok(Json(license_type))
}

#[utoipa::path(
    put,
    path = "/api/license_type/{id}",
    params(("id" = Uuid, Path, description = "License type ID")),
    request_body = UpdateLicenseTypeDto,
    responses(
        (status = 200, description = "License type updated", body = LicenseType),
        (status = 404, description = "License type not found", body = ErrorResponse),
        (status = 409, description = "Duplicate type name", body = ErrorResponse)
    ),
    tag = "License Types",
    security(("bearer_auth" = []))
)]
pub async fn update_license_type(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<LicenseTypeId>,
    ValidatedJson(dto): ValidatedJson<UpdateLicenseTypeDto>,
) -> Result<Json<LicenseType>, AppError> {
    let license_type = LicenseTypeService::update_license_type(&state.db, id, dto).await?;
    Ok(Json(license_type))
}

#[utoipa::path(
    delete,
    path = "/api/license_type/{id}",
    params(("id" = Uuid, Path, description = "License type ID")),
    responses(
        (status = 204, description = "License type deleted"),
        (status = 404, description = "License type not found", body = ErrorResponse),
        (status = 409, description = "License type still in use", body = ErrorResponse)
    ),
    tag = "License Types",
    security(("bearer_auth" = []))
)]
pub async fn delete_license_type(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<LicenseTypeId>,
) -> Result<StatusCode, AppError> {
    LicenseTypeService::delete_license_type(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
