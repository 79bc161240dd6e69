use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::StudentId;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateStudentDto, RosterList, RosterQuery, Student, UpdateScoresDto};
use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User is already a student", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn create_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/registered",
    params(("course_id" = Option<Uuid>, Query, description = "Only this course's roster")),
    responses((status = 200, description = "Registered students with scores", body = RosterList)),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn list_registered_students(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterList>, AppError> {
    let roster = StudentService::list_registered_students(&state.db, query.course_id).await?;
    Ok(Json(roster))
}

#[utoipa::path(
    put,
    path = "/api/students/scores",
    request_body = UpdateScoresDto,
    responses(
        (status = 200, description = "Refreshed roster for the course", body = RosterList),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 422, description = "Score out of range", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn update_scores(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<UpdateScoresDto>,
) -> Result<Json<RosterList>, AppError> {
    let roster = StudentService::update_scores(&state.db, dto).await?;
    Ok(Json(roster))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}
