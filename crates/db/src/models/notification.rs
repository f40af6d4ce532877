//! Notification entity model and DTOs.

use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// Someone liked the recipient's video.
pub const NOTIFICATION_TYPE_LIKE: &str = "like";
/// Someone commented on the recipient's video.
pub const NOTIFICATION_TYPE_COMMENT: &str = "comment";
/// Someone replied to the recipient's comment.
pub const NOTIFICATION_TYPE_REPLY: &str = "reply";
/// Someone subscribed to the recipient's channel.
pub const NOTIFICATION_TYPE_SUBSCRIBE: &str = "subscribe";
/// Someone mentioned the recipient.
pub const NOTIFICATION_TYPE_MENTION: &str = "mention";

/// Notification row joined with the sender's username.
///
/// Append-only except for the `is_read` flag.
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub sender_username: String,
    pub notification_type: String,
    pub video_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub text: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub notification_type: &'static str,
    pub video_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub text: String,
}
