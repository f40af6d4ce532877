//! HTTP-level integration tests for the like/dislike toggle and its
//! notification side effects.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth};
use sqlx::PgPool;

use openreel_api::auth::jwt::generate_access_token;
use openreel_api::auth::password::hash_password;
use openreel_db::models::user::{CreateUser, User};
use openreel_db::models::video::{CreateVideo, Video};
use openreel_db::repositories::{ProfileRepo, UserRepo, VideoRepo};

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

async fn create_video(pool: &PgPool, uploader_id: i64, title: &str, privacy: &str) -> Video {
    VideoRepo::create(
        pool,
        uploader_id,
        &CreateVideo {
            title: title.to_string(),
            description: String::new(),
            file_path: "videos/fixture.mp4".to_string(),
            thumbnail_path: None,
            category_id: None,
            privacy: Some(privacy.to_string()),
            duration_secs: 0,
            tags: String::new(),
        },
    )
    .await
    .expect("video creation should succeed")
}

async fn toggle(
    pool: &PgPool,
    video_id: i64,
    token: &str,
    like_type: &str,
) -> axum::http::Response<axum::body::Body> {
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/like",
        token,
        serde_json::json!({ "video_id": video_id, "like_type": like_type }),
    )
    .await
}

async fn counts(pool: &PgPool, slug: &str) -> (i64, i64) {
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/videos/{slug}"),
    )
    .await;
    let json = body_json(response).await;
    (
        json["data"]["likes_count"].as_i64().unwrap(),
        json["data"]["dislikes_count"].as_i64().unwrap(),
    )
}

/// Toggling requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_toggle_requires_auth(pool: PgPool) {
    let (owner, _token) = create_test_user(&pool, "owner").await;
    let video = create_video(&pool, owner.id, "Liked", "public").await;

    let response = common::post_json(
        common::build_test_app(pool),
        "/api/v1/like",
        serde_json::json!({ "video_id": video.id, "like_type": "like" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Missing fields are a 400 before any row is touched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_fields(pool: PgPool) {
    let (owner, _t) = create_test_user(&pool, "owner").await;
    let (_fan, fan_token) = create_test_user(&pool, "fan").await;
    let video = create_video(&pool, owner.id, "Liked", "public").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/like",
        &fan_token,
        serde_json::json!({ "like_type": "like" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/like",
        &fan_token,
        serde_json::json!({ "video_id": video.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(counts(&pool, &video.slug).await, (0, 0));
}

/// An invalid like_type is rejected before any row is touched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_like_type(pool: PgPool) {
    let (owner, _t) = create_test_user(&pool, "owner").await;
    let (_fan, fan_token) = create_test_user(&pool, "fan").await;
    let video = create_video(&pool, owner.id, "Liked", "public").await;

    let response = toggle(&pool, video.id, &fan_token, "love").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(counts(&pool, &video.slug).await, (0, 0));
}

/// Like, un-like, and flip through the full toggle state machine.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_toggle_state_machine(pool: PgPool) {
    let (owner, _t) = create_test_user(&pool, "owner").await;
    let (_fan, fan_token) = create_test_user(&pool, "fan").await;
    let video = create_video(&pool, owner.id, "Liked", "public").await;

    // First like creates a row.
    let response = toggle(&pool, video.id, &fan_token, "like").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "created");
    assert_eq!(json["like"]["like_type"], "like");
    assert_eq!(counts(&pool, &video.slug).await, (1, 0));

    // Disliking flips it in place, never creating a second row.
    let response = toggle(&pool, video.id, &fan_token, "dislike").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "updated");
    assert_eq!(counts(&pool, &video.slug).await, (0, 1));

    // Repeating the same type removes the row.
    let response = toggle(&pool, video.id, &fan_token, "dislike").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "removed");
    assert!(json["like"].is_null());
    assert_eq!(counts(&pool, &video.slug).await, (0, 0));
}

/// A like notifies the uploader; liking your own video does not.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_like_notification(pool: PgPool) {
    let (owner, owner_token) = create_test_user(&pool, "owner").await;
    let (_fan, fan_token) = create_test_user(&pool, "fan").await;
    let video = create_video(&pool, owner.id, "Liked", "public").await;

    // Self-like: no notification.
    toggle(&pool, video.id, &owner_token, "like").await;
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/notifications",
        &owner_token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Someone else's like notifies the uploader.
    toggle(&pool, video.id, &fan_token, "like").await;
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/notifications",
        &owner_token,
    )
    .await;
    let json = body_json(response).await;
    let notifications = json["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["notification_type"], "like");
    assert_eq!(notifications[0]["sender"]["username"], "fan");
    assert_eq!(notifications[0]["is_read"], false);

    // Flipping to a dislike notifies again; un-toggling stays silent.
    toggle(&pool, video.id, &fan_token, "dislike").await;
    toggle(&pool, video.id, &fan_token, "dislike").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/notifications",
        &owner_token,
    )
    .await;
    let json = body_json(response).await;
    let notifications = json["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications[0]["text"]
        .as_str()
        .unwrap()
        .contains("disliked"));
}

/// Liking a hidden video is a 404, same as a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_like_hidden_video(pool: PgPool) {
    let (owner, _t) = create_test_user(&pool, "owner").await;
    let (_fan, fan_token) = create_test_user(&pool, "fan").await;
    let video = create_video(&pool, owner.id, "Secret", "private").await;

    let response = toggle(&pool, video.id, &fan_token, "like").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
