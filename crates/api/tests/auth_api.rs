//! HTTP-level integration tests for registration, login, token refresh,
//! and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and assert success.
async fn register_user(app: axum::Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "correct horse battery",
        "password2": "correct horse battery",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in a user via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
async fn login_user(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with the safe user representation
/// and creates an empty profile for the account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_user_and_profile(pool: PgPool) {
    let json = register_user(common::build_test_app(pool.clone()), "newcomer").await;

    assert_eq!(json["username"], "newcomer");
    assert_eq!(json["email"], "newcomer@test.com");
    assert!(json["id"].is_number());
    assert!(
        json.get("password_hash").is_none(),
        "password hash must never be serialized"
    );

    // The empty profile is reachable once logged in.
    let login = login_user(
        common::build_test_app(pool.clone()),
        "newcomer",
        "correct horse battery",
    )
    .await;
    let token = login["access_token"].as_str().unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/v1/profile", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["data"]["username"], "newcomer");
    assert_eq!(profile["data"]["bio"], "");
}

/// Mismatched password confirmation is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_password_mismatch(pool: PgPool) {
    let body = serde_json::json!({
        "username": "mismatch",
        "email": "mismatch@test.com",
        "password": "correct horse battery",
        "password2": "different entirely",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Weak passwords (too short, all numeric) are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let body = serde_json::json!({
        "username": "weakpw",
        "email": "weakpw@test.com",
        "password": "12345678",
        "password2": "12345678",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(
        json["error"].as_str().unwrap().contains("password"),
        "message must name the failing field"
    );
}

/// Duplicate usernames and emails are rejected with field-level messages.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    register_user(common::build_test_app(pool.clone()), "taken").await;

    let body = serde_json::json!({
        "username": "taken",
        "email": "other@test.com",
        "password": "correct horse battery",
        "password2": "correct horse battery",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("username"),
        "message must name the duplicated field"
    );
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

/// Successful login returns 200 with access_token, refresh_token, and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    register_user(common::build_test_app(pool.clone()), "loginuser").await;

    let json = login_user(
        common::build_test_app(pool),
        "loginuser",
        "correct horse battery",
    )
    .await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["username"], "loginuser");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    register_user(common::build_test_app(pool.clone()), "wrongpw").await;

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect password" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let body = serde_json::json!({ "username": "ghost", "password": "whatever at all" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid refresh token returns new tokens and rotates the old one out.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    register_user(common::build_test_app(pool.clone()), "refresher").await;
    let login = login_user(
        common::build_test_app(pool.clone()),
        "refresher",
        "correct horse battery",
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );

    // The spent token is single-use.
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_invalid_token(pool: PgPool) {
    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session; refresh afterwards fails.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    register_user(common::build_test_app(pool.clone()), "leaver").await;
    let login = login_user(
        common::build_test_app(pool.clone()),
        "leaver",
        "correct horse battery",
    )
    .await;
    let access_token = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        access_token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A protected route without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let response = common::get(common::build_test_app(pool), "/api/v1/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
