//! Handler for video search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use openreel_db::repositories::VideoRepo;

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;
use crate::serialize::{video_to_response, VideoResponse};
use crate::state::AppState;

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/search
///
/// Case-insensitive substring search over title, description, tags, and
/// uploader username, under the caller's visibility filter. An empty query
/// returns an empty result rather than everything.
pub async fn search(
    State(state): State<AppState>,
    maybe_auth: MaybeAuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<Vec<VideoResponse>>>> {
    let videos = VideoRepo::search(
        &state.pool,
        &query.q,
        maybe_auth.user_id(),
        query.limit,
        query.offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: videos.iter().map(video_to_response).collect(),
    }))
}
