//! Handlers for the `/comments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use openreel_core::error::CoreError;
use openreel_core::types::DbId;
use openreel_db::models::comment::{Comment, CreateComment};
use openreel_db::models::notification::{
    CreateNotification, NOTIFICATION_TYPE_COMMENT, NOTIFICATION_TYPE_REPLY,
};
use openreel_db::models::video::Video;
use openreel_db::repositories::{CommentRepo, NotificationRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::permissions::{ensure_comment_author, video_visible_to};
use crate::response::DataResponse;
use crate::serialize::{build_comment_tree, comment_to_response, CommentResponse};
use crate::state::AppState;

/// Request body for `POST /comments`. The video is addressed by slug; the
/// author comes from the access token.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub video: String,
    pub parent_id: Option<DbId>,
    pub text: String,
}

/// Request body for `PATCH /comments/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: String,
}

/// Query parameters for `GET /comments`.
#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    /// Video slug; when present the response is that video's reply tree.
    pub video: Option<String>,
    /// Pagination for the unfiltered flat listing.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn validate_text(text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "text: must not be empty".into(),
        )));
    }
    Ok(())
}

/// One notification per comment: `comment` to the uploader for top-level
/// comments, `reply` to the parent's author for replies. Self-notification
/// is skipped in both cases.
async fn notify_for_comment(
    state: &AppState,
    video: &Video,
    comment: &Comment,
    parent: Option<&Comment>,
) -> AppResult<()> {
    let notification = match parent {
        Some(parent) if parent.user_id != comment.user_id => CreateNotification {
            recipient_id: parent.user_id,
            sender_id: comment.user_id,
            notification_type: NOTIFICATION_TYPE_REPLY,
            video_id: Some(video.id),
            comment_id: Some(comment.id),
            text: format!("{} replied to your comment", comment.username),
        },
        None if video.uploader_id != comment.user_id => CreateNotification {
            recipient_id: video.uploader_id,
            sender_id: comment.user_id,
            notification_type: NOTIFICATION_TYPE_COMMENT,
            video_id: Some(video.id),
            comment_id: Some(comment.id),
            text: format!("{} commented on your video \"{}\"", comment.username, video.title),
        },
        _ => return Ok(()),
    };
    NotificationRepo::create(&state.pool, &notification).await?;
    Ok(())
}

/// POST /api/v1/comments
///
/// Comment on a video, optionally as a reply. The parent must be a comment
/// on the same video.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentResponse>>)> {
    validate_text(&input.text)?;

    let video = VideoRepo::find_by_slug(&state.pool, &input.video)
        .await?
        .filter(|v| video_visible_to(Some(auth.user_id), v))
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "video",
                slug: input.video.clone(),
            })
        })?;

    let parent = match input.parent_id {
        Some(parent_id) => {
            let parent = CommentRepo::find_by_id(&state.pool, parent_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "comment",
                    id: parent_id,
                }))?;
            if parent.video_id != video.id {
                return Err(AppError::Core(CoreError::Validation(
                    "parent_id: parent comment belongs to a different video".into(),
                )));
            }
            Some(parent)
        }
        None => None,
    };

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            video_id: video.id,
            user_id: auth.user_id,
            parent_id: input.parent_id,
            text: input.text,
        },
    )
    .await?;

    notify_for_comment(&state, &video, &comment, parent.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: comment_to_response(&comment, Vec::new()),
        }),
    ))
}

/// GET /api/v1/comments
///
/// With `?video={slug}`: that video's reply tree (same shape as the
/// per-video sub-route). Without a filter: a flat newest-first listing
/// across all videos, paginated.
pub async fn list(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Query(query): Query<CommentListQuery>,
) -> AppResult<Json<DataResponse<Vec<CommentResponse>>>> {
    let data = match query.video {
        Some(slug) => {
            let video = VideoRepo::find_by_slug(&state.pool, &slug)
                .await?
                .filter(|v| video_visible_to(maybe_auth.user_id(), v))
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFoundBySlug {
                        entity: "video",
                        slug: slug.clone(),
                    })
                })?;
            let flat = CommentRepo::list_for_video(&state.pool, video.id).await?;
            build_comment_tree(flat)
        }
        None => CommentRepo::list_all(&state.pool, query.limit, query.offset)
            .await?
            .iter()
            .map(|c| comment_to_response(c, Vec::new()))
            .collect(),
    };
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/comments/{id}
///
/// Edit a comment's text. Author only.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCommentRequest>,
) -> AppResult<Json<DataResponse<CommentResponse>>> {
    validate_text(&input.text)?;

    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    ensure_comment_author(auth.user_id, &comment)?;

    let updated = CommentRepo::update_text(&state.pool, id, &input.text)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: comment_to_response(&updated, Vec::new()),
    }))
}

/// DELETE /api/v1/comments/{id}
///
/// Delete a comment and its reply subtree. Author only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    ensure_comment_author(auth.user_id, &comment)?;

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
