//! HTTP-level integration tests for profile endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, send_json_auth};
use sqlx::PgPool;

use openreel_api::auth::jwt::generate_access_token;
use openreel_api::auth::password::hash_password;
use openreel_db::models::user::{CreateUser, User};
use openreel_db::repositories::{ProfileRepo, UserRepo};

async fn create_test_user(pool: &PgPool, username: &str) -> (User, String) {
    let hashed = hash_password("test password phrase").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
            first_name: String::new(),
            last_name: String::new(),
        },
    )
    .await
    .expect("user creation should succeed");
    ProfileRepo::create_empty(pool, user.id)
        .await
        .expect("profile creation should succeed");
    let token = generate_access_token(user.id, &common::test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// A profile is publicly readable by username; unknown usernames 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_by_username(pool: PgPool) {
    create_test_user(&pool, "visible").await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/profiles/visible").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "visible");

    let response = get(common::build_test_app(pool), "/api/v1/profiles/nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Updates through /profile apply only the provided fields and only ever
/// touch the caller's own row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_own_partial(pool: PgPool) {
    let (_owner, owner_token) = create_test_user(&pool, "owner").await;
    let (_other, other_token) = create_test_user(&pool, "other").await;

    let body = serde_json::json!({ "bio": "hello there", "location": "Berlin" });
    let response = send_json_auth(
        common::build_test_app(pool.clone()),
        Method::PUT,
        "/api/v1/profile",
        &owner_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "hello there");
    assert_eq!(json["data"]["location"], "Berlin");
    assert_eq!(json["data"]["website"], "", "absent fields stay unchanged");

    // Second update leaves the bio alone.
    let body = serde_json::json!({ "website": "https://example.com" });
    let response = send_json_auth(
        common::build_test_app(pool.clone()),
        Method::PUT,
        "/api/v1/profile",
        &owner_token,
        body,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "hello there");
    assert_eq!(json["data"]["website"], "https://example.com");

    // Another caller's update lands on their own row, not the owner's.
    let body = serde_json::json!({ "bio": "my own bio" });
    let response = send_json_auth(
        common::build_test_app(pool.clone()),
        Method::PUT,
        "/api/v1/profile",
        &other_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "other");
    assert_eq!(json["data"]["bio"], "my own bio");

    let response = get(common::build_test_app(pool), "/api/v1/profiles/owner").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["bio"], "hello there");
}

/// /profile resolves to the caller and rejects anonymous requests.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_own_profile_requires_auth(pool: PgPool) {
    let (_owner, owner_token) = create_test_user(&pool, "owner").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/profile",
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "owner");

    let response = get(common::build_test_app(pool.clone()), "/api/v1/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::send_json(
        common::build_test_app(pool),
        Method::PUT,
        "/api/v1/profile",
        serde_json::json!({ "bio": "anonymous" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
