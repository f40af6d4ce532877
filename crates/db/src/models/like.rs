//! Like entity model and toggle outcome.

use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// A positive reaction.
pub const LIKE_TYPE_LIKE: &str = "like";
/// A negative reaction.
pub const LIKE_TYPE_DISLIKE: &str = "dislike";

/// Valid like types, mirrored by the database CHECK constraint.
pub const VALID_LIKE_TYPES: &[&str] = &[LIKE_TYPE_LIKE, LIKE_TYPE_DISLIKE];

/// Check whether a like type string is accepted.
pub fn is_valid_like_type(like_type: &str) -> bool {
    VALID_LIKE_TYPES.contains(&like_type)
}

/// A row from the `likes` table. At most one row exists per (video, user),
/// enforced by the `uq_likes_video_user` constraint.
#[derive(Debug, Clone, FromRow)]
pub struct Like {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub like_type: String,
    pub created_at: Timestamp,
}

/// Result of a toggle request against an existing or absent like row.
#[derive(Debug, Clone)]
pub enum ToggleOutcome {
    /// No prior row existed; one was created with the requested type.
    Created(Like),
    /// A row with the same type existed and was deleted.
    Removed,
    /// A row with the opposite type existed and was flipped in place.
    Updated(Like),
}
