use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_payment, get_payment, list_payments};

pub fn init_payments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/{id}", get(get_payment))
}
