use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::HealthCheckScheduleId;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateHealthCheckScheduleDto, HealthCheckSchedule, HealthCheckScheduleFilterParams,
    HealthCheckScheduleList, UpdateHealthCheckScheduleDto,
};
use super::service::HealthCheckScheduleService;

#[utoipa::path(
    post,
    path = "/api/health_check_schedule",
    request_body = CreateHealthCheckScheduleDto,
    responses(
        (status = 201, description = "Health check scheduled", body = HealthCheckSchedule),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Datetime is not in the future", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn create_health_check_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateHealthCheckScheduleDto>,
) -> Result<(StatusCode, Json<HealthCheckSchedule>), AppError> {
    let schedule = HealthCheckScheduleService::create_schedule(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    get,
    path = "/api/health_check_schedule",
    params(
        ("course_id" = Option<Uuid>, Query, description = "Only slots for this course"),
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Page size (1-100)")
    ),
    responses((status = 200, description = "Health check schedules", body = HealthCheckScheduleList)),
    tag = "Health Checks"
)]
pub async fn list_health_check_schedules(
    State(state): State<AppState>,
    Query(filters): Query<HealthCheckScheduleFilterParams>,
) -> Result<Json<HealthCheckScheduleList>, AppError> {
    let list = HealthCheckScheduleService::list_schedules(&state.db, filters).await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/api/health_check_schedule/{id}",
    params(("id" = Uuid, Path, description = "Health check schedule ID")),
    responses(
        (status = 200, description = "Health check schedule", body = HealthCheckSchedule),
        (status = 404, description = "Health check schedule not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn get_health_check_schedule(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<HealthCheckScheduleId>,
) -> Result<Json<HealthCheckSchedule>, AppError> {
    let schedule = HealthCheckScheduleService::get_schedule(&state.db, id).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    put,
    path = "/api/health_check_schedule/{id}",
    params(("id" = Uuid, Path, description = "Health check schedule ID")),
    request_body = UpdateHealthCheckScheduleDto,
    responses(
        (status = 200, description = "Health check schedule updated", body = HealthCheckSchedule),
        (status = 404, description = "Schedule or course not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn update_health_check_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<HealthCheckScheduleId>,
    ValidatedJson(dto): ValidatedJson<UpdateHealthCheckScheduleDto>,
) -> Result<Json<HealthCheckSchedule>, AppError> {
    let schedule = HealthCheckScheduleService::update_schedule(&state.db, id, dto).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/health_check_schedule/{id}",
    params(("id" = Uuid, Path, description = "Health check schedule ID")),
    responses(
        (status = 200, description = "The removed schedule", body = HealthCheckSchedule),
        (status = 404, description = "Health check schedule not found", body = ErrorResponse)
    ),
    tag = "Health Checks",
    security(("bearer_auth" = []))
)]
pub async fn delete_health_check_schedule(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<HealthCheckScheduleId>,
) -> Result<Json<HealthCheckSchedule>, AppError> {
    let schedule = HealthCheckScheduleService::delete_schedule(&state.db, id).await?;
    Ok(Json(schedule))
}
