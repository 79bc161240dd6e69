use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_user, get_me, get_user, login};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/login", post(login))
        .route("/me", get(get_me))
        .route("/{id}", get(get_user))
}
