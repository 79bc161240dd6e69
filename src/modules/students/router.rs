use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{create_student, get_student, list_registered_students, update_scores};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student))
        .route("/registered", get(list_registered_students))
        .route("/scores", put(update_scores))
        .route("/{id}", get(get_student))
}
