use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use drivewise_core::AppError;
use drivewise_models::ids::{PersonalInfoDocumentId, UserId};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireStaff;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreatePersonalInfoDocumentDto, PersonalInfoDocument, UpdatePersonalInfoDocumentDto,
};
use super::service::PersonalInfoDocumentService;

#[utoipa::path(
    post,
    path = "/api/personal_info_document",
    request_body = CreatePersonalInfoDocumentDto,
    responses(
        (status = 201, description = "Personal info recorded", body = PersonalInfoDocument),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Personal Info",
    security(("bearer_auth" = []))
)]
pub async fn create_personal_info_document(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreatePersonalInfoDocumentDto>,
) -> Result<(StatusCode, Json<PersonalInfoDocument>), AppError> {
    let document = PersonalInfoDocumentService::create_document(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/api/personal_info_document/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Most recent personal info for the user", body = PersonalInfoDocument),
        (status = 404, description = "No personal info on file", body = ErrorResponse)
    ),
    tag = "Personal Info",
    security(("bearer_auth" = []))
)]
pub async fn get_personal_info_for_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<PersonalInfoDocument>, AppError> {
    let document = PersonalInfoDocumentService::latest_for_user(&state.db, user_id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    get,
    path = "/api/personal_info_document/{id}",
    params(("id" = Uuid, Path, description = "Personal info document ID")),
    responses(
        (status = 200, description = "Personal info document", body = PersonalInfoDocument),
        (status = 404, description = "Personal info document not found", body = ErrorResponse)
    ),
    tag = "Personal Info",
    security(("bearer_auth" = []))
)]
pub async fn get_personal_info_document(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<PersonalInfoDocumentId>,
) -> Result<Json<PersonalInfoDocument>, AppError> {
    let document = PersonalInfoDocumentService::get_document(&state.db, id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    put,
    path = "/api/personal_info_document/{id}",
    params(("id" = Uuid, Path, description = "Personal info document ID")),
    request_body = UpdatePersonalInfoDocumentDto,
    responses(
        (status = 200, description = "Personal info updated", body = PersonalInfoDocument),
        (status = 404, description = "Personal info document not found", body = ErrorResponse)
    ),
    tag = "Personal Info",
    security(("bearer_auth" = []))
)]
pub async fn update_personal_info_document(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<PersonalInfoDocumentId>,
    ValidatedJson(dto): ValidatedJson<UpdatePersonalInfoDocumentDto>,
) -> Result<Json<PersonalInfoDocument>, AppError> {
    let document = PersonalInfoDocumentService::update_document(&state.db, id, dto).await?;
    Ok(Json(document))
}
