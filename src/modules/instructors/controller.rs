use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use drivewise_core::{AppError, PaginationParams};

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateInstructorDto, Instructor, InstructorList};
use super::service::InstructorService;

#[utoipa::path(
    get,
    path = "/api/instructor",
    params(PaginationParams),
    responses((status = 200, description = "Instructors with their user accounts", body = InstructorList)),
    tag = "Instructors"
)]
pub async fn list_instructors(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<InstructorList>, AppError> {
    let list = InstructorService::list_instructors(&state.db, pagination).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post,
    path = "/api/instructor",
    request_body = CreateInstructorDto,
    responses(
        (status = 201, description = "Instructor created", body = Instructor),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User is already an instructor", body = ErrorResponse)
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
pub async fn create_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateInstructorDto>,
) -> Result<(StatusCode, Json<Instructor>), AppError> {
    let instructor = InstructorService::create_instructor(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}
