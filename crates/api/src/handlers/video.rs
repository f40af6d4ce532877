//! Handlers for the `/videos` resource, including the per-video discovery
//! and interaction sub-routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use openreel_core::error::CoreError;
use openreel_core::types::DbId;
use openreel_db::models::video::{
    is_valid_privacy, CreateVideo, UpdateVideo, Video, VideoFilter, VALID_PRIVACY_LEVELS,
};
use openreel_db::models::video_view::RecordView;
use openreel_db::repositories::{
    CategoryRepo, CommentRepo, UserRepo, VideoRepo, VideoViewRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::client_meta::ClientMeta;
use crate::permissions::{ensure_video_owner, video_visible_to};
use crate::response::{DataResponse, StatusResponse};
use crate::serialize::{
    build_comment_tree, video_to_response, CommentResponse, VideoResponse,
};
use crate::state::AppState;

/// Query parameters for `GET /videos`.
#[derive(Debug, Deserialize)]
pub struct VideoListQuery {
    /// Filter by category slug.
    pub category: Option<String>,
    /// Filter by privacy level.
    pub privacy: Option<String>,
    /// Filter by uploader username.
    pub uploader: Option<String>,
    /// Ordering key (`created_at`, `views`, `title`; `-` prefix descends).
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Resolve the visible bare video row behind a slug, or 404.
///
/// A row hidden by the caller's visibility filter yields the same 404 as a
/// missing one.
async fn find_visible_video(
    state: &AppState,
    slug: &str,
    viewer: Option<DbId>,
) -> AppResult<Video> {
    let video = VideoRepo::find_by_slug(&state.pool, slug)
        .await?
        .filter(|v| video_visible_to(viewer, v))
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "video",
                slug: slug.to_string(),
            })
        })?;
    Ok(video)
}

/// Validate the mutable video fields shared by create and update.
fn validate_video_fields(privacy: Option<&str>, title: Option<&str>) -> AppResult<()> {
    if let Some(privacy) = privacy {
        if !is_valid_privacy(privacy) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "privacy: must be one of {}",
                VALID_PRIVACY_LEVELS.join(", ")
            ))));
        }
    }
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "title: must not be empty".into(),
            )));
        }
    }
    Ok(())
}

/// Validate that a referenced category exists.
async fn validate_category(state: &AppState, category_id: Option<DbId>) -> AppResult<()> {
    if let Some(category_id) = category_id {
        if CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "category_id: no category with id {category_id}"
            ))));
        }
    }
    Ok(())
}

/// POST /api/v1/videos
///
/// Create a video owned by the authenticated caller. The slug is derived
/// server-side and the view counter starts at zero.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoResponse>>)> {
    validate_video_fields(input.privacy.as_deref(), Some(&input.title))?;
    if input.file_path.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "file_path: must not be empty".into(),
        )));
    }
    validate_category(&state, input.category_id).await?;

    let video = VideoRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(video_id = video.id, slug = %video.slug, uploader_id = auth.user_id, "Video created");

    // Re-read through the detail query so the response carries the embedded
    // uploader, category, and zeroed interaction counts.
    let detail = VideoRepo::find_visible_by_slug(&state.pool, &video.slug, Some(auth.user_id))
        .await?
        .ok_or_else(|| AppError::InternalError("Created video not readable".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: video_to_response(&detail),
        }),
    ))
}

/// GET /api/v1/videos
///
/// List videos visible to the caller with optional category, privacy, and
/// uploader filters plus whitelisted ordering and pagination.
pub async fn list(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Query(query): Query<VideoListQuery>,
) -> AppResult<Json<DataResponse<Vec<VideoResponse>>>> {
    // An uploader filter naming an unknown user matches nothing.
    let uploader_id = match &query.uploader {
        Some(username) => match UserRepo::find_by_username(&state.pool, username).await? {
            Some(user) => Some(user.id),
            None => {
                return Ok(Json(DataResponse { data: Vec::new() }));
            }
        },
        None => None,
    };

    let filter = VideoFilter {
        category_slug: query.category,
        privacy: query.privacy,
        uploader_id,
        ordering: query.ordering,
        limit: query.limit,
        offset: query.offset,
    };
    let videos = VideoRepo::list(&state.pool, &filter, maybe_auth.user_id()).await?;
    Ok(Json(DataResponse {
        data: videos.iter().map(video_to_response).collect(),
    }))
}

/// GET /api/v1/videos/featured
///
/// Top public videos ranked by views, then likes.
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VideoResponse>>>> {
    let videos = VideoRepo::featured(&state.pool).await?;
    Ok(Json(DataResponse {
        data: videos.iter().map(video_to_response).collect(),
    }))
}

/// GET /api/v1/videos/{slug}
///
/// Video detail with embedded uploader, category, and interaction counts.
/// Hidden videos 404 exactly like missing ones.
pub async fn get_by_slug(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<VideoResponse>>> {
    let detail = VideoRepo::find_visible_by_slug(&state.pool, &slug, maybe_auth.user_id())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "video",
                slug: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse {
        data: video_to_response(&detail),
    }))
}

/// PATCH /api/v1/videos/{slug}
///
/// Partial update by the uploader. The slug and view counter are never
/// writable.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<DataResponse<VideoResponse>>> {
    let video = find_visible_video(&state, &slug, Some(auth.user_id)).await?;
    ensure_video_owner(auth.user_id, &video)?;

    validate_video_fields(input.privacy.as_deref(), input.title.as_deref())?;
    validate_category(&state, input.category_id.flatten()).await?;

    VideoRepo::update(&state.pool, video.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "video",
            id: video.id,
        }))?;

    let detail = VideoRepo::find_visible_by_slug(&state.pool, &slug, Some(auth.user_id))
        .await?
        .ok_or_else(|| AppError::InternalError("Updated video not readable".into()))?;
    Ok(Json(DataResponse {
        data: video_to_response(&detail),
    }))
}

/// DELETE /api/v1/videos/{slug}
///
/// Delete a video and everything that cascades from it. Uploader only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    let video = find_visible_video(&state, &slug, Some(auth.user_id)).await?;
    ensure_video_owner(auth.user_id, &video)?;

    VideoRepo::delete(&state.pool, video.id).await?;
    tracing::info!(video_id = video.id, slug = %video.slug, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/videos/{slug}/view
///
/// Record a view: append an audit row with the caller's identity (if any)
/// and client metadata, then bump the denormalized counter atomically.
pub async fn record_view(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    client: ClientMeta,
    Path(slug): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let video = find_visible_video(&state, &slug, maybe_auth.user_id()).await?;

    VideoViewRepo::record(
        &state.pool,
        &RecordView {
            video_id: video.id,
            user_id: maybe_auth.user_id(),
            ip_address: client.ip_address,
            user_agent: client.user_agent,
        },
    )
    .await?;
    VideoRepo::increment_views(&state.pool, video.id).await?;

    Ok(Json(StatusResponse {
        status: "view recorded".into(),
    }))
}

/// GET /api/v1/videos/{slug}/comments
///
/// The video's comment tree: top-level comments newest-first, replies
/// nested under their parents.
pub async fn comments(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<CommentResponse>>>> {
    let video = find_visible_video(&state, &slug, maybe_auth.user_id()).await?;
    let flat = CommentRepo::list_for_video(&state.pool, video.id).await?;
    Ok(Json(DataResponse {
        data: build_comment_tree(flat),
    }))
}

/// GET /api/v1/videos/{slug}/related
///
/// Public videos sharing the source's category or tags, newest-first. The
/// source itself is excluded.
pub async fn related(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Vec<VideoResponse>>>> {
    let video = find_visible_video(&state, &slug, maybe_auth.user_id()).await?;
    let videos = VideoRepo::related(&state.pool, &video).await?;
    Ok(Json(DataResponse {
        data: videos.iter().map(video_to_response).collect(),
    }))
}
