use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_health_check_schedule, delete_health_check_schedule, get_health_check_schedule,
    list_health_check_schedules, update_health_check_schedule,
};

pub fn init_health_check_schedules_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_health_check_schedules).post(create_health_check_schedule),
        )
        .route(
            "/{id}",
            get(get_health_check_schedule)
                .put(update_health_check_schedule)
                .delete(delete_health_check_schedule),
        )
}
