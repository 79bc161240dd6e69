use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_health_check_document, delete_health_check_document, get_health_check_document,
    list_health_check_documents, update_health_check_document,
};

pub fn init_health_check_documents_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_health_check_documents).post(create_health_check_document),
        )
        .route(
            "/{id}",
            get(get_health_check_document)
                .put(update_health_check_document)
                .delete(delete_health_check_document),
        )
}
