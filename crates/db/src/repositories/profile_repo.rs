//! Repository for the `profiles` table.
//!
//! Profiles are always addressed through their owning user; every query
//! joins `users` so responses carry the username and email.

use sqlx::PgPool;

use openreel_core::types::DbId;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for `profiles` queries (joined with `users` as `u`).
const COLUMNS: &str = "p.id, p.user_id, u.username, u.email, p.bio, p.avatar_path, \
                       p.location, p.website, p.date_of_birth, p.created_at, p.updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Create an empty profile for a freshly registered user.
    ///
    /// Called as an explicit step inside account creation, never as a hook.
    pub async fn create_empty(pool: &PgPool, user_id: DbId) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                 INSERT INTO profiles (user_id) VALUES ($1) RETURNING *
             )
             SELECT {COLUMNS}
             FROM inserted p
             JOIN users u ON u.id = p.user_id"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find the profile owned by a user.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update the profile owned by a user. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the user has no profile row.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                 UPDATE profiles SET
                     bio = COALESCE($2, bio),
                     avatar_path = COALESCE($3, avatar_path),
                     location = COALESCE($4, location),
                     website = COALESCE($5, website),
                     date_of_birth = COALESCE($6, date_of_birth),
                     updated_at = NOW()
                 WHERE user_id = $1
                 RETURNING *
             )
             SELECT {COLUMNS}
             FROM updated p
             JOIN users u ON u.id = p.user_id"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.avatar_path)
            .bind(&input.location)
            .bind(&input.website)
            .bind(input.date_of_birth)
            .fetch_optional(pool)
            .await
    }
}
