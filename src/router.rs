use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::course_registrations::router::init_course_registrations_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::health_check_documents::router::init_health_check_documents_router;
use crate::modules::health_check_schedules::router::init_health_check_schedules_router;
use crate::modules::instructors::router::init_instructors_router;
use crate::modules::license_types::router::init_license_types_router;
use crate::modules::licenses::router::init_licenses_router;
use crate::modules::payment_methods::router::init_payment_methods_router;
use crate::modules::payments::router::init_payments_router;
use crate::modules::personal_info_documents::router::init_personal_info_documents_router;
use crate::modules::schedules::router::init_schedules_router;
use crate::modules::students::router::init_students_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application. Access rules are enforced per handler by the
/// `AuthUser`, `RequireStaff` and `RequireAdmin` extractors.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/users", init_users_router())
                .nest("/license_type", init_license_types_router())
                .nest("/courses", init_courses_router())
                .nest("/licenses", init_licenses_router())
                .nest("/health_check_schedule", init_health_check_schedules_router())
                .nest("/health_check_document", init_health_check_documents_router())
                .nest("/personal_info_document", init_personal_info_documents_router())
                .nest("/course_registration", init_course_registrations_router())
                .nest("/payment_method", init_payment_methods_router())
                .nest("/payments", init_payments_router())
                .nest("/schedule", init_schedules_router())
                .nest("/instructor", init_instructors_router())
                .nest("/students", init_students_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

/// Wraps the router so `/api/courses/` and `/api/courses` reach the same
/// handler. The layer sits outside the `Router` because path rewriting has to
/// happen before routing.
pub fn init_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(init_router(state))
}
