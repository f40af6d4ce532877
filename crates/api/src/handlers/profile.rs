//! Handlers for profile endpoints.
//!
//! Writes are only ever addressed through the caller, so ownership is
//! structural: there is no route that updates someone else's profile.

use axum::extract::{Path, State};
use axum::Json;

use openreel_core::error::CoreError;
use openreel_db::models::profile::UpdateProfile;
use openreel_db::repositories::{ProfileRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::serialize::{profile_to_response, ProfileResponse};
use crate::state::AppState;

/// GET /api/v1/profile
///
/// The authenticated caller's own profile.
pub async fn get_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: profile_to_response(&profile),
    }))
}

/// PUT /api/v1/profile
///
/// Partial update of the caller's own profile. Absent fields are left
/// unchanged.
pub async fn update_own(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let updated = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: profile_to_response(&updated),
    }))
}

/// GET /api/v1/profiles/{username}
///
/// A user's public profile, looked up by username.
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "user",
                slug: username.clone(),
            })
        })?;
    let profile = ProfileRepo::find_by_user(&state.pool, user.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: user.id,
        }))?;
    Ok(Json(DataResponse {
        data: profile_to_response(&profile),
    }))
}
