use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_personal_info_document, get_personal_info_document, get_personal_info_for_user,
    update_personal_info_document,
};

pub fn init_personal_info_documents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_personal_info_document))
        .route("/user/{user_id}", get(get_personal_info_for_user))
        .route(
            "/{id}",
            get(get_personal_info_document).put(update_personal_info_document),
        )
}
