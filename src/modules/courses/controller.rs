use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::{AppError, PaginationParams};
use drivewise_models::ids::CourseId;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Course, CourseList, CreateCourseDto, UpdateCourseDto};
use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "License type not found", body = ErrorResponse),
        (status = 422, description = "Invalid dates or values", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(PaginationParams),
    responses((status = 200, description = "Courses in creation order", body = CourseList)),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<CourseList>, AppError> {
    let list = CourseService::list_courses(&state.db, pagination).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Date ordering or capacity violated", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "The removed course", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::delete_course(&state.db, id).await?;
    Ok(Json(course))
}
