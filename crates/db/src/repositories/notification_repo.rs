//! Repository for the `notifications` table.

use sqlx::PgPool;

use openreel_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use openreel_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};

/// Column list for `notifications` queries (joined with `users` as `s` for
/// the sender).
const COLUMNS: &str = "n.id, n.recipient_id, n.sender_id, s.username AS sender_username, \
                       n.notification_type, n.video_id, n.comment_id, n.text, \
                       n.is_read, n.created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Append a notification, returning the generated ID.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications \
                 (recipient_id, sender_id, notification_type, video_id, comment_id, text) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.recipient_id)
        .bind(input.sender_id)
        .bind(input.notification_type)
        .bind(input.video_id)
        .bind(input.comment_id)
        .bind(&input.text)
        .fetch_one(pool)
        .await
    }

    /// List notifications addressed to a user, newest-first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND n.is_read = false"
        } else {
            ""
        };
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM notifications n \
             JOIN users s ON s.id = n.sender_id \
             WHERE n.recipient_id = $1 {filter} \
             ORDER BY n.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a single notification as read. Idempotent.
    ///
    /// The update is scoped to the recipient, so a caller can never mark
    /// someone else's notification. Returns `true` if the notification
    /// exists and belongs to the recipient.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        recipient_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true \
             WHERE id = $1 AND recipient_id = $2",
        )
        .bind(notification_id)
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(pool: &PgPool, recipient_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true \
             WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(recipient_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, recipient_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(recipient_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
