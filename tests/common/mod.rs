#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use drivewise::drivewise_config::{CorsConfig, JwtConfig};
use drivewise::drivewise_core::hash_password;
use drivewise::drivewise_models::enums::UserRole;
use drivewise::router::init_app;
use drivewise::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;
use uuid::Uuid;

/// The application as `main` serves it.
pub type TestApp = NormalizePath<Router>;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_JWT_SECRET, 3600)
}

pub fn setup_test_app(pool: PgPool) -> TestApp {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    init_app(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@drivewise.test", Uuid::new_v4())
}

/// Inserts an active user with the given role and [`TEST_PASSWORD`].
pub async fn create_user_with_role(pool: &PgPool, role: UserRole) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (user_name, email, phone_number, password, role)
         VALUES ($1, $2, '0900000000', $3, $4)
         RETURNING id",
    )
    .bind(format!("{}-{}", role.as_str(), Uuid::new_v4()))
    .bind(&email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
    }
}

pub async fn get_auth_token(app: &TestApp, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Creates a user with `role` and returns a bearer token for it.
pub async fn token_for_role(app: &TestApp, pool: &PgPool, role: UserRole) -> String {
    let user = create_user_with_role(pool, role).await;
    get_auth_token(app, &user.email, &user.password).await
}

/// Sends one request through the router and returns the status with the
/// decoded JSON body (`Value::Null` for empty bodies).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub struct Catalogue {
    pub license_type_id: Uuid,
    pub course_id: Uuid,
    pub health_check_schedule_id: Uuid,
}

/// Seeds one license type, a course for it and a health check slot.
pub async fn seed_catalogue(pool: &PgPool) -> Catalogue {
    let license_type_id: Uuid = sqlx::query_scalar(
        "INSERT INTO license_types (type_name, age_requirement, health_requirements, training_duration, fee)
         VALUES ($1, '18+', 'Vision check', 90, 6000000)
         RETURNING id",
    )
    .bind(format!("B2-{}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap();

    let course_id: Uuid = sqlx::query_scalar(
        "INSERT INTO courses (course_name, license_type_id, start_date, end_date, max_students, price)
         VALUES ('B2 evening', $1, '2026-01-05', '2026-04-05', 30, 6500000)
         RETURNING id",
    )
    .bind(license_type_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let health_check_schedule_id: Uuid = sqlx::query_scalar(
        "INSERT INTO health_check_schedules (course_id, address, scheduled_datetime)
         VALUES ($1, '12 Clinic Road', '2026-01-10T08:00:00Z')
         RETURNING id",
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap();

    Catalogue {
        license_type_id,
        course_id,
        health_check_schedule_id,
    }
}

pub fn registration_body(catalogue: &Catalogue, identity_number: &str, role: &str) -> Value {
    json!({
        "identity_number": identity_number,
        "full_name": "Nguyen Van An",
        "gender": "male",
        "phone_number": "0912345678",
        "date_of_birth": "2000-05-17",
        "address": "45 Le Loi, District 1",
        "license_type_id": catalogue.license_type_id,
        "identity_image_front": "https://cdn.drivewise.test/id-front.png",
        "identity_image_back": "https://cdn.drivewise.test/id-back.png",
        "avatar": "https://cdn.drivewise.test/avatar.png",
        "course_id": catalogue.course_id,
        "health_check_schedule_id": catalogue.health_check_schedule_id,
        "role": role
    })
}
