use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_license_type, delete_license_type, get_license_type, list_license_types,
    update_license_type,
};

pub fn init_license_types_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_license_types).post(create_license_type))
        .route(
            "/{id}",
            get(get_license_type)
                .put(update_license_type)
                .delete(delete_license_type),
        )
}
