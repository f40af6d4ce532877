//! Video view audit-log entity.

use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// A row from the append-only `video_views` table. Never updated.
#[derive(Debug, Clone, FromRow)]
pub struct VideoView {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub viewed_at: Timestamp,
}

/// DTO for recording a view. The user is present only for authenticated
/// callers; anonymous views carry IP and user agent alone.
#[derive(Debug)]
pub struct RecordView {
    pub video_id: DbId,
    pub user_id: Option<DbId>,
    pub ip_address: Option<String>,
    pub user_agent: String,
}
