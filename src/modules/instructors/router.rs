use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_instructor, list_instructors};

pub fn init_instructors_router() -> Router<AppState> {
    Router::new().route("/", get(list_instructors).post(create_instructor))
}
