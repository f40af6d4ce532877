//! Repository for the append-only `video_views` table.

use sqlx::PgPool;

use openreel_core::types::DbId;

use crate::models::video_view::RecordView;

/// Provides append and count operations for view records.
pub struct VideoViewRepo;

impl VideoViewRepo {
    /// Append a view record, returning the generated ID. Rows are never
    /// updated afterwards.
    pub async fn record(pool: &PgPool, input: &RecordView) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO video_views (video_id, user_id, ip_address, user_agent)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.video_id)
        .bind(input.user_id)
        .bind(&input.ip_address)
        .bind(&input.user_agent)
        .fetch_one(pool)
        .await
    }

    /// Number of view records for a video.
    pub async fn count_for_video(pool: &PgPool, video_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM video_views WHERE video_id = $1")
                .bind(video_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
