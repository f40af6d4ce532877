//! Repository for the `comments` table.

use sqlx::PgPool;

use openreel_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use openreel_core::types::DbId;

use crate::models::comment::{Comment, CreateComment};

/// Column list for `comments` queries (joined with `users` as `u`).
const COLUMNS: &str = "cm.id, cm.video_id, cm.user_id, u.username, cm.parent_id, \
                       cm.text, cm.created_at, cm.updated_at";

/// Shared FROM clause joining the author.
const FROM: &str = "FROM comments cm JOIN users u ON u.id = cm.user_id";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row with the author's
    /// username resolved.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                 INSERT INTO comments (video_id, user_id, parent_id, text)
                 VALUES ($1, $2, $3, $4)
                 RETURNING *
             )
             SELECT cm.id, cm.video_id, cm.user_id, u.username, cm.parent_id, \
                    cm.text, cm.created_at, cm.updated_at
             FROM inserted cm
             JOIN users u ON u.id = cm.user_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.video_id)
            .bind(input.user_id)
            .bind(input.parent_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE cm.id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All comments on a video, newest-first. Includes replies; the caller
    /// assembles the tree from `parent_id`.
    pub async fn list_for_video(pool: &PgPool, video_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM}
             WHERE cm.video_id = $1
             ORDER BY cm.created_at DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    /// All comments across all videos, newest-first with clamped
    /// pagination. Used by the unfiltered comment listing.
    pub async fn list_all(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} {FROM}
             ORDER BY cm.created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a comment's text. Returns `None` if no row exists.
    pub async fn update_text(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                 UPDATE comments SET text = $2, updated_at = NOW()
                 WHERE id = $1
                 RETURNING *
             )
             SELECT cm.id, cm.video_id, cm.user_id, u.username, cm.parent_id, \
                    cm.text, cm.created_at, cm.updated_at
             FROM updated cm
             JOIN users u ON u.id = cm.user_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(text)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Its reply subtree cascades via the parent FK.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
