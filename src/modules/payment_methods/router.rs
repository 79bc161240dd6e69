use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_payment_method, get_payment_method, list_payment_methods, update_payment_method,
};

pub fn init_payment_methods_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payment_methods).post(create_payment_method))
        .route("/{id}", get(get_payment_method).put(update_payment_method))
}
