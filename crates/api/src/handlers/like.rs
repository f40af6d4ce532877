//! Handler for the like/dislike toggle.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use openreel_core::error::CoreError;
use openreel_core::types::DbId;
use openreel_db::models::like::{
    is_valid_like_type, ToggleOutcome, LIKE_TYPE_LIKE, VALID_LIKE_TYPES,
};
use openreel_db::models::notification::{CreateNotification, NOTIFICATION_TYPE_LIKE};
use openreel_db::models::video::Video;
use openreel_db::repositories::{LikeRepo, NotificationRepo, UserRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::permissions::video_visible_to;
use crate::serialize::{like_to_response, LikeResponse};
use crate::state::AppState;

/// Request body for `POST /like`. Both fields are validated before any row
/// is touched, so they deserialize as optional.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub video_id: Option<DbId>,
    pub like_type: Option<String>,
}

/// Outcome of a toggle: `status` says what happened, `like` carries the
/// surviving row when one exists.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: &'static str,
    pub like: Option<LikeResponse>,
}

/// POST /api/v1/like
///
/// Toggle a like or dislike on a video. A missing or invalid `video_id` or
/// `like_type` is rejected before any store mutation. Creating a reaction
/// or flipping an existing one notifies the uploader, unless they are the
/// caller; removing one never does.
pub async fn toggle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ToggleRequest>,
) -> AppResult<(StatusCode, Json<ToggleResponse>)> {
    let video_id = input.video_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation("video_id: required".into()))
    })?;
    let like_type = input.like_type.ok_or_else(|| {
        AppError::Core(CoreError::Validation("like_type: required".into()))
    })?;
    if !is_valid_like_type(&like_type) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "like_type: must be one of {}",
            VALID_LIKE_TYPES.join(", ")
        ))));
    }

    let video = VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .filter(|v| video_visible_to(Some(auth.user_id), v))
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "video",
            id: video_id,
        }))?;

    let outcome = LikeRepo::toggle(&state.pool, video.id, auth.user_id, &like_type).await?;

    let (status_code, response) = match outcome {
        ToggleOutcome::Created(like) => {
            notify_uploader(&state, &video, auth.user_id, &like.like_type).await?;
            (
                StatusCode::CREATED,
                ToggleResponse {
                    status: "created",
                    like: Some(like_to_response(&like)),
                },
            )
        }
        ToggleOutcome::Updated(like) => {
            notify_uploader(&state, &video, auth.user_id, &like.like_type).await?;
            (
                StatusCode::OK,
                ToggleResponse {
                    status: "updated",
                    like: Some(like_to_response(&like)),
                },
            )
        }
        ToggleOutcome::Removed => (
            StatusCode::OK,
            ToggleResponse {
                status: "removed",
                like: None,
            },
        ),
    };

    Ok((status_code, Json(response)))
}

/// Notify the uploader that someone reacted to their video. Un-toggles and
/// self-reactions produce no notification.
async fn notify_uploader(
    state: &AppState,
    video: &Video,
    actor_id: DbId,
    like_type: &str,
) -> AppResult<()> {
    if video.uploader_id == actor_id {
        return Ok(());
    }
    let actor = UserRepo::find_by_id(&state.pool, actor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user",
            id: actor_id,
        }))?;
    let verb = if like_type == LIKE_TYPE_LIKE {
        "liked"
    } else {
        "disliked"
    };
    NotificationRepo::create(
        &state.pool,
        &CreateNotification {
            recipient_id: video.uploader_id,
            sender_id: actor_id,
            notification_type: NOTIFICATION_TYPE_LIKE,
            video_id: Some(video.id),
            comment_id: None,
            text: format!("{} {verb} your video \"{}\"", actor.username, video.title),
        },
    )
    .await?;
    Ok(())
}
