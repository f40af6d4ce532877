//! Repository for the `videos` table.
//!
//! Every read query applies the caller's visibility filter in SQL: anonymous
//! callers see only public videos, authenticated callers additionally see
//! unlisted videos and their own rows regardless of privacy. A row the
//! caller cannot see is indistinguishable from one that does not exist.

use sqlx::PgPool;

use openreel_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use openreel_core::slug::derive_video_slug;
use openreel_core::types::DbId;

use crate::models::video::{CreateVideo, UpdateVideo, Video, VideoDetail, VideoFilter};

/// Column list for bare `videos` rows.
const COLUMNS: &str = "id, title, description, file_path, thumbnail_path, uploader_id, \
                       category_id, privacy, views, slug, duration_secs, tags, \
                       created_at, updated_at";

/// Column list for detail rows: video aliased `v`, joined with users `u` and
/// categories `c`, plus interaction counts.
const DETAIL_COLUMNS: &str = "\
    v.id, v.title, v.description, v.file_path, v.thumbnail_path, \
    v.uploader_id, u.username AS uploader_username, \
    v.category_id, c.name AS category_name, c.slug AS category_slug, \
    v.privacy, v.views, v.slug, v.duration_secs, v.tags, v.created_at, v.updated_at, \
    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id AND l.like_type = 'like') AS likes_count, \
    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id AND l.like_type = 'dislike') AS dislikes_count, \
    (SELECT COUNT(*) FROM comments cm WHERE cm.video_id = v.id) AS comments_count";

/// Shared FROM clause for detail queries.
const DETAIL_FROM: &str = "FROM videos v \
     JOIN users u ON u.id = v.uploader_id \
     LEFT JOIN categories c ON c.id = v.category_id";

/// Visibility predicate. The viewer id is always bound as `$1` (NULL for
/// anonymous callers).
const VISIBILITY: &str = "(CASE WHEN $1::BIGINT IS NULL \
        THEN v.privacy = 'public' \
        ELSE (v.privacy IN ('public', 'unlisted') OR v.uploader_id = $1) END)";

/// Number of rows returned by the featured and related queries.
const DISCOVERY_LIMIT: i64 = 10;

/// Map a client ordering key onto a whitelisted ORDER BY clause.
///
/// Accepts `created_at`, `views`, and `title`, each optionally `-` prefixed
/// for descending order. Anything else falls back to newest-first.
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("created_at") => "v.created_at ASC",
        Some("-created_at") | None => "v.created_at DESC",
        Some("views") => "v.views ASC",
        Some("-views") => "v.views DESC",
        Some("title") => "v.title ASC",
        Some("-title") => "v.title DESC",
        Some(_) => "v.created_at DESC",
    }
}

/// Escape LIKE/ILIKE metacharacters in user-supplied search input.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Provides CRUD and discovery operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video for the given uploader, returning the created row.
    ///
    /// The slug is derived from the title plus a random suffix; `views`
    /// starts at zero.
    pub async fn create(
        pool: &PgPool,
        uploader_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let slug = derive_video_slug(&input.title);
        let privacy = input.privacy.as_deref().unwrap_or("public");
        let query = format!(
            "INSERT INTO videos \
                 (title, description, file_path, thumbnail_path, uploader_id, \
                  category_id, privacy, slug, duration_secs, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_path)
            .bind(&input.thumbnail_path)
            .bind(uploader_id)
            .bind(input.category_id)
            .bind(privacy)
            .bind(&slug)
            .bind(input.duration_secs)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a bare video row by internal ID, ignoring visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a bare video row by slug, ignoring visibility.
    ///
    /// Used for ownership checks and internal lookups; callers must apply
    /// their own authorization before exposing the row.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE slug = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a video by slug as seen by `viewer`, with uploader, category,
    /// and interaction counts. Returns `None` when the row is absent or
    /// filtered out by visibility.
    pub async fn find_visible_by_slug(
        pool: &PgPool,
        slug: &str,
        viewer: Option<DbId>,
    ) -> Result<Option<VideoDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE {VISIBILITY} AND v.slug = $2"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(viewer)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List videos visible to `viewer`, applying optional category, privacy,
    /// and uploader filters plus whitelisted ordering and pagination.
    pub async fn list(
        pool: &PgPool,
        filter: &VideoFilter,
        viewer: Option<DbId>,
    ) -> Result<Vec<VideoDetail>, sqlx::Error> {
        let order = order_clause(filter.ordering.as_deref());
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE {VISIBILITY}
               AND ($2::TEXT IS NULL OR c.slug = $2)
               AND ($3::TEXT IS NULL OR v.privacy = $3)
               AND ($4::BIGINT IS NULL OR v.uploader_id = $4)
             ORDER BY {order}
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(viewer)
            .bind(&filter.category_slug)
            .bind(&filter.privacy)
            .bind(filter.uploader_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Public videos in a category, newest-first, paginated.
    pub async fn list_public_in_category(
        pool: &PgPool,
        category_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<VideoDetail>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE v.privacy = 'public' AND v.category_id = $1
             ORDER BY v.created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Top public videos ranked by view count, then like count, descending.
    pub async fn featured(pool: &PgPool) -> Result<Vec<VideoDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE v.privacy = 'public'
             ORDER BY v.views DESC, likes_count DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(DISCOVERY_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Public videos related to `source`: same category, or tags containing
    /// the source's tags as a substring. The source itself is excluded.
    ///
    /// The tag match is substring-based over the comma-joined tags field and
    /// is skipped when the source has no tags, so an untagged video does not
    /// match everything.
    pub async fn related(pool: &PgPool, source: &Video) -> Result<Vec<VideoDetail>, sqlx::Error> {
        let tags = source.tags.trim();
        let tag_pattern = if tags.is_empty() {
            None
        } else {
            Some(format!("%{}%", escape_like(tags)))
        };
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE v.privacy = 'public'
               AND v.id <> $1
               AND (($2::BIGINT IS NOT NULL AND v.category_id = $2)
                    OR ($3::TEXT IS NOT NULL AND v.tags ILIKE $3))
             ORDER BY v.created_at DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(source.id)
            .bind(source.category_id)
            .bind(tag_pattern)
            .bind(DISCOVERY_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over title, description, tags, and
    /// uploader username, under the caller's visibility filter.
    ///
    /// An empty or whitespace-only query returns no rows.
    pub async fn search(
        pool: &PgPool,
        q: &str,
        viewer: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<VideoDetail>, sqlx::Error> {
        let q = q.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("%{}%", escape_like(q));
        let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE {VISIBILITY}
               AND (v.title ILIKE $2 OR v.description ILIKE $2
                    OR v.tags ILIKE $2 OR u.username ILIKE $2)
             ORDER BY v.created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, VideoDetail>(&query)
            .bind(viewer)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a video. Only non-`None` fields in `input` are applied; the
    /// slug and view counter are never writable. The category is the one
    /// nullable field, so it carries a presence flag instead of relying on
    /// COALESCE -- an explicit null clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                thumbnail_path = COALESCE($4, thumbnail_path),
                category_id = CASE WHEN $5 THEN $6::BIGINT ELSE category_id END,
                privacy = COALESCE($7, privacy),
                duration_secs = COALESCE($8, duration_secs),
                tags = COALESCE($9, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.thumbnail_path)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(&input.privacy)
            .bind(input.duration_secs)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete a video. Comments, likes, and view records cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump the view counter by one.
    ///
    /// A single in-place UPDATE so concurrent viewers never lose updates.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_whitelist() {
        assert_eq!(order_clause(None), "v.created_at DESC");
        assert_eq!(order_clause(Some("-views")), "v.views DESC");
        assert_eq!(order_clause(Some("title")), "v.title ASC");
        // Unknown keys never reach the SQL string.
        assert_eq!(order_clause(Some("uploader_id; DROP TABLE videos")), "v.created_at DESC");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
