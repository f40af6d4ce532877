//! Database-level tests for repository invariants that the HTTP tests do
//! not reach directly.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use openreel_db::models::session::CreateSession;
use openreel_db::models::user::CreateUser;
use openreel_db::repositories::{CategoryRepo, SessionRepo, UserRepo};

async fn create_user(pool: &PgPool, username: &str) -> openreel_db::models::user::User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "irrelevant-hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Repeating a category name resolves to the same row, case and punctuation
/// folded into the slug.
#[sqlx::test(migrations = "./migrations")]
async fn test_category_get_or_create_idempotent(pool: PgPool) {
    let first = CategoryRepo::get_or_create(&pool, "Science & Tech", "stem videos")
        .await
        .expect("first get_or_create should succeed");
    let second = CategoryRepo::get_or_create(&pool, "Science & Tech", "ignored")
        .await
        .expect("second get_or_create should succeed");

    assert_eq!(first.id, second.id);
    assert_eq!(first.slug, "science-tech");
    assert_eq!(
        second.description, "stem videos",
        "existing rows keep their original description"
    );

    let all = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

/// Expired and revoked sessions are invisible to the active lookup.
#[sqlx::test(migrations = "./migrations")]
async fn test_session_expiry_and_revocation(pool: PgPool) {
    let user = create_user(&pool, "sessioned").await;

    let expired = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-expired".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();
    let active = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-active".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "hash-expired")
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        SessionRepo::find_active_by_hash(&pool, "hash-active")
            .await
            .unwrap()
            .map(|s| s.id),
        Some(active.id)
    );

    // Revocation is one-shot per row.
    assert!(SessionRepo::revoke(&pool, active.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, active.id).await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "hash-active")
        .await
        .unwrap()
        .is_none());

    // revoke_all only touches rows not already revoked.
    let _ = expired;
    let revoked = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked, 1, "only the expired-but-unrevoked session remains");
}
