//! Repository for the `likes` table.
//!
//! The single-row-per-(video, user) invariant is enforced by the
//! `uq_likes_video_user` constraint, so concurrent toggle requests cannot
//! produce duplicate rows.

use sqlx::PgPool;

use openreel_core::types::DbId;

use crate::models::like::{Like, ToggleOutcome};

/// Column list for `likes` queries.
const COLUMNS: &str = "id, video_id, user_id, like_type, created_at";

/// Provides the like/dislike toggle and lookups.
pub struct LikeRepo;

impl LikeRepo {
    /// Toggle a like/dislike for `(video_id, user_id)`.
    ///
    /// - No existing row: insert one with the requested type (`Created`).
    /// - Existing row of the same type: delete it (`Removed`).
    /// - Existing row of the opposite type: flip it in place (`Updated`).
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` against the unique
    /// constraint, so a concurrent insert falls through to the
    /// existing-row branches instead of erroring.
    pub async fn toggle(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
        like_type: &str,
    ) -> Result<ToggleOutcome, sqlx::Error> {
        let insert = format!(
            "INSERT INTO likes (video_id, user_id, like_type)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_likes_video_user DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Like>(&insert)
            .bind(video_id)
            .bind(user_id)
            .bind(like_type)
            .fetch_optional(pool)
            .await?;
        if let Some(like) = created {
            return Ok(ToggleOutcome::Created(like));
        }

        // A row already exists for this pair. Same type means un-toggle;
        // opposite type means flip.
        let removed = sqlx::query(
            "DELETE FROM likes WHERE video_id = $1 AND user_id = $2 AND like_type = $3",
        )
        .bind(video_id)
        .bind(user_id)
        .bind(like_type)
        .execute(pool)
        .await?;
        if removed.rows_affected() > 0 {
            return Ok(ToggleOutcome::Removed);
        }

        let flip = format!(
            "UPDATE likes SET like_type = $3
             WHERE video_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Like>(&flip)
            .bind(video_id)
            .bind(user_id)
            .bind(like_type)
            .fetch_one(pool)
            .await?;
        Ok(ToggleOutcome::Updated(updated))
    }

    /// Find the like row for a (video, user) pair, if any.
    pub async fn find(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Like>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM likes WHERE video_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Like>(&query)
            .bind(video_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Count likes of a given type on a video.
    pub async fn count_for_video(
        pool: &PgPool,
        video_id: DbId,
        like_type: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM likes WHERE video_id = $1 AND like_type = $2",
        )
        .bind(video_id)
        .bind(like_type)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
