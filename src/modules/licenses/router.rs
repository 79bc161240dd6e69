use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_license, delete_license, get_license, get_license_by_number, list_licenses,
    list_licenses_by_student, list_licenses_by_type, update_license,
};

pub fn init_licenses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_licenses).post(create_license))
        .route("/student/{student_id}", get(list_licenses_by_student))
        .route("/type/{license_type_id}", get(list_licenses_by_type))
        .route("/number/{license_number}", get(get_license_by_number))
        .route(
            "/{id}",
            get(get_license).put(update_license).delete(delete_license),
        )
}
