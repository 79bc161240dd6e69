use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Router, routing::get};
use drivewise::drivewise_auth::create_access_token;
use drivewise::drivewise_config::{CorsConfig, JwtConfig};
use drivewise::middleware::auth::AuthUser;
use drivewise::middleware::role::{RequireAdmin, RequireStaff};
use drivewise::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

fn jwt_config() -> JwtConfig {
    JwtConfig::new("role-middleware-test-secret", 3600)
}

/// A router whose handlers only run the extractors; the pool never connects.
fn gated_app() -> Router {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let state = AppState::new(
        db,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec![],
        },
    );

    Router::new()
        .route("/signed-in", get(|user: AuthUser| async move { user.role().to_string() }))
        .route("/staff", get(|_: RequireStaff| async { "staff ok" }))
        .route("/admin", get(|_: RequireAdmin| async { "admin ok" }))
        .with_state(state)
}

async fn status_for(path: &str, role: Option<&str>) -> StatusCode {
    let mut builder = Request::builder().uri(path);
    if let Some(role) = role {
        let token =
            create_access_token(Uuid::new_v4(), "someone@drivewise.test", role, &jwt_config())
                .unwrap();
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    gated_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_signed_in_accepts_every_known_role() {
    for role in ["user", "staff", "admin", "teacher"] {
        assert_eq!(status_for("/signed-in", Some(role)).await, StatusCode::OK);
    }
    assert_eq!(status_for("/signed-in", None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_staff_gate() {
    assert_eq!(status_for("/staff", Some("admin")).await, StatusCode::OK);
    assert_eq!(status_for("/staff", Some("staff")).await, StatusCode::OK);
    assert_eq!(status_for("/staff", Some("teacher")).await, StatusCode::FORBIDDEN);
    assert_eq!(status_for("/staff", Some("user")).await, StatusCode::FORBIDDEN);
    assert_eq!(status_for("/staff", None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_gate() {
    assert_eq!(status_for("/admin", Some("admin")).await, StatusCode::OK);
    assert_eq!(status_for("/admin", Some("staff")).await, StatusCode::FORBIDDEN);
    assert_eq!(status_for("/admin", Some("Admin ")).await, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    assert_eq!(status_for("/staff", Some("superuser")).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let token = create_access_token(
        Uuid::new_v4(),
        "someone@drivewise.test",
        "admin",
        &JwtConfig::new("some-other-secret", 3600),
    )
    .unwrap();
    let response = gated_app()
        .oneshot(
            Request::builder()
                .uri("/admin")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
