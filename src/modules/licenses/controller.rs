use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::{LicenseId, LicenseTypeId, StudentId};

use crate::docs::ErrorResponse;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateLicenseDto, License, LicenseList, UpdateLicenseDto};
use super::service::LicenseService;

#[utoipa::path(
    post,
    path = "/api/licenses",
    request_body = CreateLicenseDto,
    responses(
        (status = 201, description = "License issued", body = License),
        (status = 404, description = "Student or license type not found", body = ErrorResponse),
        (status = 409, description = "License number already exists", body = ErrorResponse)
    ),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn create_license(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateLicenseDto>,
) -> Result<(StatusCode, Json<License>), AppError> {
    let license = LicenseService::create_license(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(license)))
}

#[utoipa::path(
    get,
    path = "/api/licenses",
    params(PaginationParams),
    responses((status = 200, description = "Licenses", body = LicenseList)),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn list_licenses(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<LicenseList>, AppError> {
    let list = LicenseService::list_licenses(&state.db, pagination).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/licenses/{id}",
    params(("id" = Uuid, Path, description = "License ID")),
    responses(
        (status = 200, description = "License", body = License),
        (status = 404, description = "License not found", body = ErrorResponse)
    ),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn get_license(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<LicenseId>,
) -> Result<Json<License>, AppError> {
    let license = LicenseService::get_license(&state.db, id).await?;
    Ok(Json(license))
}

#[utoipa::path(
    get,
    path = "/api/licenses/student/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student ID")),
    responses((status = 200, description = "Licenses held by the student", body = LicenseList)),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn list_licenses_by_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(student_id): Path<StudentId>,
) -> Result<Json<LicenseList>, AppError> {
    let list = LicenseService::list_by_student(&state.db, student_id).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/licenses/type/{license_type_id}",
    params(("license_type_id" = Uuid, Path, description = "License type ID")),
    responses((status = 200, description = "Licenses of the type", body = LicenseList)),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn list_licenses_by_type(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(license_type_id): Path<LicenseTypeId>,
) -> Result<Json<LicenseList>, AppError> {
    let list = LicenseService::list_by_type(&state.db, license_type_id).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/licenses/number/{license_number}",
    params(("license_number" = String, Path, description = "License number")),
    responses(
        (status = 200, description = "License", body = License),
        (status = 404, description = "License not found", body = ErrorResponse)
    ),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn get_license_by_number(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(license_number): Path<String>,
) -> Result<Json<License>, AppError> {
    let license = LicenseService::get_by_number(&state.db, &license_number).await?;
    Ok(Json(license))
}

#[utoipa::path(
    put,
    path = "/api/licenses/{id}",
    params(("id" = Uuid, Path, description = "License ID")),
    request_body = UpdateLicenseDto,
    responses(
        (status = 200, description = "License updated", body = License),
        (status = 404, description = "License not found", body = ErrorResponse),
        (status = 409, description = "License number already exists", body = ErrorResponse)
    ),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn update_license(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<LicenseId>,
    ValidatedJson(dto): ValidatedJson<UpdateLicenseDto>,
) -> Result<Json<License>, AppError> {
    let license = LicenseService::update_license(&state.db, id, dto).await?;
    Ok(Json(license))
}

#[utoipa::path(
    delete,
    path = "/api/licenses/{id}",
    params(("id" = Uuid, Path, description = "License ID")),
    responses(
        (status = 204, description = "License deleted"),
        (status = 404, description = "License not found", body = ErrorResponse)
    ),
    tag = "Licenses",
    security(("bearer_auth" = []))
)]
pub async fn delete_license(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<LicenseId>,
) -> Result<StatusCode, AppError> {
    LicenseService::delete_license(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
