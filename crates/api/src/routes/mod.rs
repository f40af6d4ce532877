pub mod auth;
pub mod category;
pub mod comment;
pub mod health;
pub mod notification;
pub mod profile;
pub mod search;
pub mod video;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
///
/// /profile                          own profile: GET, PUT (requires auth)
/// /profiles/{username}              public profile by username
///
/// /videos                           list (public), create (requires auth)
/// /videos/featured                  discovery: top public videos
/// /videos/{slug}                    detail, update, delete
/// /videos/{slug}/view               record a view (POST)
/// /videos/{slug}/comments           comment tree for a video
/// /videos/{slug}/related            discovery: related public videos
///
/// /like                             toggle like/dislike (POST, requires auth)
///
/// /categories                       list
/// /categories/{slug}                detail
/// /categories/{slug}/videos         public videos in a category
///
/// /comments                         list (tree with ?video=), create
/// /comments/{id}                    update, delete (author only)
///
/// /notifications                    list (requires auth)
/// /notifications/unread-count       unread counter
/// /notifications/read-all           mark all read (POST)
/// /notifications/{id}/read          mark one read (POST)
///
/// /search                           video search (?q=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication: registration, login, token refresh, logout.
        .nest("/auth", auth::router())
        // The caller's own profile, plus public reads by username.
        .nest("/profile", profile::own_router())
        .nest("/profiles", profile::public_router())
        // Video CRUD, discovery, and per-video interactions.
        .nest("/videos", video::router())
        // Like/dislike toggle, addressed by video id in the body.
        .route("/like", post(handlers::like::toggle))
        // Categories and their public video listings.
        .nest("/categories", category::router())
        // Comment CRUD across videos.
        .nest("/comments", comment::router())
        // Notifications, always scoped to the caller.
        .nest("/notifications", notification::router())
        // Video search.
        .nest("/search", search::router())
}
