use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::CourseRegistrationId;

use crate::docs::ErrorResponse;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CourseRegistration, CreateCourseRegistrationDto, RegistrationAck, RegistrationDetail,
    RegistrationFilterParams, RegistrationList, StatusAck, UpdateCourseRegistrationDto,
};
use super::service::CourseRegistrationService;

/// Self-service and front-desk entry point; no token required.
#[utoipa::path(
    post,
    path = "/api/course_registration",
    request_body = CreateCourseRegistrationDto,
    responses(
        (status = 201, description = "Registration created", body = RegistrationAck),
        (status = 404, description = "Course, health check schedule or license type not found", body = ErrorResponse),
        (status = 409, description = "Identity number or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Course Registrations"
)]
pub async fn create_course_registration(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseRegistrationDto>,
) -> Result<(StatusCode, Json<RegistrationAck>), AppError> {
    let ack = CourseRegistrationService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

#[utoipa::path(
    get,
    path = "/api/course_registration",
    params(
        ("type" = Option<String>, Query, description = "online, offline or all"),
        ("status" = Option<String>, Query, description = "Registration status or all"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100)")
    ),
    responses(
        (status = 200, description = "Registrations", body = RegistrationList),
        (status = 422, description = "Unknown filter value", body = ErrorResponse)
    ),
    tag = "Course Registrations",
    security(("bearer_auth" = []))
)]
pub async fn list_course_registrations(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(filters): Query<RegistrationFilterParams>,
) -> Result<Json<RegistrationList>, AppError> {
    let list = CourseRegistrationService::list_registrations(&state.db, filters).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/course_registration/identity_number/{identity_number}",
    params(("identity_number" = String, Path, description = "National identity number")),
    responses(
        (status = 200, description = "Registration detail", body = RegistrationDetail),
        (status = 404, description = "No registration for this identity number", body = ErrorResponse)
    ),
    tag = "Course Registrations"
)]
pub async fn get_registration_by_identity_number(
    State(state): State<AppState>,
    Path(identity_number): Path<String>,
) -> Result<Json<RegistrationDetail>, AppError> {
    let detail =
        CourseRegistrationService::get_by_identity_number(&state.db, &identity_number).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/course_registration/{id}",
    params(("id" = Uuid, Path, description = "Course registration ID")),
    responses(
        (status = 200, description = "Registration detail", body = RegistrationDetail),
        (status = 404, description = "Course registration not found", body = ErrorResponse)
    ),
    tag = "Course Registrations",
    security(("bearer_auth" = []))
)]
pub async fn get_course_registration(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<CourseRegistrationId>,
) -> Result<Json<RegistrationDetail>, AppError> {
    let detail = CourseRegistrationService::get_registration_detail(&state.db, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    put,
    path = "/api/course_registration/{id}",
    params(("id" = Uuid, Path, description = "Course registration ID")),
    request_body = UpdateCourseRegistrationDto,
    responses(
        (status = 200, description = "Registration updated", body = CourseRegistration),
        (status = 404, description = "Course registration not found", body = ErrorResponse)
    ),
    tag = "Course Registrations",
    security(("bearer_auth" = []))
)]
pub async fn update_course_registration(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<CourseRegistrationId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRegistrationDto>,
) -> Result<Json<CourseRegistration>, AppError> {
    let registration = CourseRegistrationService::update_registration(&state.db, id, dto).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    delete,
    path = "/api/course_registration/{id}",
    params(("id" = Uuid, Path, description = "Course registration ID")),
    responses(
        (status = 200, description = "Registration deleted", body = StatusAck),
        (status = 404, description = "Course registration not found", body = ErrorResponse)
    ),
    tag = "Course Registrations",
    security(("bearer_auth" = []))
)]
pub async fn delete_course_registration(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CourseRegistrationId>,
) -> Result<Json<StatusAck>, AppError> {
    let ack = CourseRegistrationService::delete_registration(&state.db, id).await?;
    Ok(Json(ack))
}
