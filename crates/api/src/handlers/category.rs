//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::Json;

use openreel_core::error::CoreError;
use openreel_db::repositories::{CategoryRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::serialize::{category_to_response, video_to_response, CategoryResponse, VideoResponse};
use crate::state::AppState;

/// GET /api/v1/categories
///
/// All categories ordered by name.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryResponse>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: categories.iter().map(category_to_response).collect(),
    }))
}

/// GET /api/v1/categories/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<CategoryResponse>>> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "category",
                slug: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse {
        data: category_to_response(&category),
    }))
}

/// GET /api/v1/categories/{slug}/videos
///
/// Public videos in a category, newest-first, paginated.
pub async fn videos(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<VideoResponse>>>> {
    let category = CategoryRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "category",
                slug: slug.clone(),
            })
        })?;
    let videos = VideoRepo::list_public_in_category(
        &state.pool,
        category.id,
        pagination.limit,
        pagination.offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: videos.iter().map(video_to_response).collect(),
    }))
}
