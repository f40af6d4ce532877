//! Handlers for the `/notifications` resource. Every route requires
//! authentication and is scoped to the caller as recipient.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use openreel_core::error::CoreError;
use openreel_core::types::DbId;
use openreel_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, StatusResponse};
use crate::serialize::{notification_to_response, NotificationResponse};
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    /// When true, only unread notifications are returned.
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// GET /api/v1/notifications
///
/// The caller's notifications, newest-first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<DataResponse<Vec<NotificationResponse>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        query.unread_only,
        query.limit,
        query.offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications.iter().map(notification_to_response).collect(),
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCountResponse>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCountResponse { count },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark one notification as read. 404 when it does not exist or is not
/// addressed to the caller; re-marking a read notification succeeds.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusResponse>> {
    let marked = NotificationRepo::mark_read(&state.pool, id, auth.user_id).await?;
    if !marked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "notification",
            id,
        }));
    }
    Ok(Json(StatusResponse {
        status: "read".into(),
    }))
}

/// POST /api/v1/notifications/read-all
///
/// Mark all of the caller's unread notifications as read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<StatusResponse>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(StatusResponse {
        status: format!("{updated} notifications marked read"),
    }))
}
