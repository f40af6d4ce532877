//! Comment entity model and DTOs.

use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// Comment row joined with the author's username.
///
/// `parent_id` forms the reply tree; the API layer assembles subtrees from
/// a flat per-video fetch.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub parent_id: Option<DbId>,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comment. The author is set from the authenticated
/// caller at the handler layer.
#[derive(Debug)]
pub struct CreateComment {
    pub video_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub text: String,
}
