//! Video entity model and DTOs.
//!
//! Videos are addressed externally by slug; the numeric id stays internal.
//! Privacy is a three-way classification, not a workflow.

use serde::{Deserialize, Deserializer};
use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// Privacy level: visible to everyone and listed.
pub const PRIVACY_PUBLIC: &str = "public";
/// Privacy level: visible only to the uploader.
pub const PRIVACY_PRIVATE: &str = "private";
/// Privacy level: reachable by link/auth but not listed to anonymous callers.
pub const PRIVACY_UNLISTED: &str = "unlisted";

/// Valid privacy levels, mirrored by the database CHECK constraint.
pub const VALID_PRIVACY_LEVELS: &[&str] = &[PRIVACY_PUBLIC, PRIVACY_PRIVATE, PRIVACY_UNLISTED];

/// Check whether a privacy string is one of the accepted levels.
pub fn is_valid_privacy(privacy: &str) -> bool {
    VALID_PRIVACY_LEVELS.contains(&privacy)
}

/// A bare row from the `videos` table, used for ownership checks and as the
/// source for related-video matching.
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub uploader_id: DbId,
    pub category_id: Option<DbId>,
    pub privacy: String,
    pub views: i64,
    pub slug: String,
    pub duration_secs: i64,
    pub tags: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Video row joined with uploader/category metadata and interaction counts.
///
/// This is the shape every read endpoint returns; the API crate maps it into
/// the nested wire representation.
#[derive(Debug, Clone, FromRow)]
pub struct VideoDetail {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub uploader_id: DbId,
    pub uploader_username: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub privacy: String,
    pub views: i64,
    pub slug: String,
    pub duration_secs: i64,
    pub tags: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments_count: i64,
}

/// DTO for creating a video. The uploader is never client-supplied; it is
/// set from the authenticated caller at the handler layer.
#[derive(Debug, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub category_id: Option<DbId>,
    pub privacy: Option<String>,
    #[serde(default)]
    pub duration_secs: i64,
    #[serde(default)]
    pub tags: String,
}

/// DTO for updating a video. All fields are optional; slug and views are
/// read-only and deliberately absent.
///
/// `category_id` is doubly optional: an absent key leaves the category
/// unchanged, while an explicit `null` clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_path: Option<String>,
    #[serde(default, deserialize_with = "present_as_some")]
    pub category_id: Option<Option<DbId>>,
    pub privacy: Option<String>,
    pub duration_secs: Option<i64>,
    pub tags: Option<String>,
}

/// Wrap a present field in `Some` so an absent key (`None` via the serde
/// default) stays distinguishable from an explicit `null` (`Some(None)`).
fn present_as_some<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DbId>::deserialize(deserializer).map(Some)
}

/// Filters accepted by the video list endpoint.
#[derive(Debug, Default)]
pub struct VideoFilter {
    pub category_slug: Option<String>,
    pub privacy: Option<String>,
    pub uploader_id: Option<DbId>,
    /// Whitelisted ordering key, optionally `-` prefixed for descending.
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
