use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::ScheduleId;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateScheduleDto, ScheduleDetail, ScheduleList, ScheduleWindowQuery, UpdateScheduleDto,
};
use super::service::ScheduleService;

#[utoipa::path(
    get,
    path = "/api/schedule",
    params(
        ("start_time" = Option<String>, Query, description = "Window start (RFC 3339); defaults to Monday 00:00 of this week"),
        ("end_time" = Option<String>, Query, description = "Window end (RFC 3339); defaults to Sunday 23:59:59 of this week")
    ),
    responses(
        (status = 200, description = "Schedules starting in the window", body = ScheduleList),
        (status = 422, description = "end_time is before start_time", body = ErrorResponse)
    ),
    tag = "Schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(window): Query<ScheduleWindowQuery>,
) -> Result<Json<ScheduleList>, AppError> {
    let list = ScheduleService::list_schedules(&state.db, window).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/schedule/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleDetail),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<ScheduleId>,
) -> Result<Json<ScheduleDetail>, AppError> {
    let schedule = ScheduleService::get_schedule(&state.db, id).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    post,
    path = "/api/schedule",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = ScheduleDetail),
        (status = 404, description = "Course, instructor or exam not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<ScheduleDetail>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    put,
    path = "/api/schedule/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = ScheduleDetail),
        (status = 404, description = "Schedule or reference not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ScheduleId>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleDto>,
) -> Result<Json<ScheduleDetail>, AppError> {
    let schedule = ScheduleService::update_schedule(&state.db, id, dto).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ScheduleId>,
) -> Result<StatusCode, AppError> {
    ScheduleService::delete_schedule(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
