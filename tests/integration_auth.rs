mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{
    create_user_with_role, get_auth_token, send, setup_test_app, test_jwt_config, token_for_role,
};
use drivewise::drivewise_auth::{Claims, encode_claims};
use drivewise::drivewise_models::enums::UserRole;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_and_fetch_me(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_user_with_role(&pool, UserRole::Staff).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": user.email, "password": user.password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "staff");

    let token = body["access_token"].as_str().unwrap();
    let (status, me) = send(&app, "GET", "/api/users/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], user.email.as_str());
    assert!(me.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_wrong_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_user_with_role(&pool, UserRole::User).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": user.email, "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_user_cannot_log_in(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_user_with_role(&pool, UserRole::Staff).await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/users/login",
        None,
        Some(json!({ "email": user.email, "password": user.password })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_and_malformed_tokens_are_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, body) = send(&app, "GET", "/api/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_token_is_reported_as_expired(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_user_with_role(&pool, UserRole::Admin).await;

    let issued = Utc::now().timestamp() as usize - 7200;
    let token = encode_claims(
        &Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: "admin".to_string(),
            exp: issued + 60,
            iat: issued,
        },
        &test_jwt_config(),
    )
    .unwrap();

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");

    // Expiry is checked before the admin role is
    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({
            "course_name": "Late night",
            "license_type_id": uuid::Uuid::new_v4(),
            "start_date": "2026-03-01",
            "end_date": "2026-04-01",
            "max_students": 10,
            "price": 1000000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_role_gates(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user_token = token_for_role(&app, &pool, UserRole::User).await;
    let staff_token = token_for_role(&app, &pool, UserRole::Staff).await;
    let admin_token = token_for_role(&app, &pool, UserRole::Admin).await;

    // Staff-only read
    let (status, _) = send(&app, "GET", "/api/course_registration", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/api/course_registration", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Admin-only write
    let body = json!({ "method": "momo" });
    let (status, err) = send(
        &app,
        "POST",
        "/api/payment_method",
        Some(&staff_token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["error"], "Access denied. Required roles: admin");

    let (status, created) =
        send(&app, "POST", "/api/payment_method", Some(&admin_token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["method"], "momo");

    // Public read
    let (status, _) = send(&app, "GET", "/api/payment_method", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_user_then_log_in(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, created) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "user_name": "front-desk",
            "email": "desk@drivewise.test",
            "phone_number": "0901112223",
            "password": "desk-pass",
            "role": "staff"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "staff");

    let token = get_auth_token(&app, "desk@drivewise.test", "desk-pass").await;
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "user_name": "front-desk-2",
            "email": "desk@drivewise.test",
            "password": "desk-pass",
            "role": "staff"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}
