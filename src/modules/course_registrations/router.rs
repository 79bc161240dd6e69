use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_course_registration, delete_course_registration, get_course_registration,
    get_registration_by_identity_number, list_course_registrations, update_course_registration,
};

pub fn init_course_registrations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_course_registrations).post(create_course_registration),
        )
        .route(
            "/identity_number/{identity_number}",
            get(get_registration_by_identity_number),
        )
        .route(
            "/{id}",
            get(get_course_registration)
                .put(update_course_registration)
                .delete(delete_course_registration),
        )
}
