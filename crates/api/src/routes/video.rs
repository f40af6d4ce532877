//! Route definitions for the `/videos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// `/featured` is registered before `/{slug}` so the literal segment wins.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create (requires auth)
/// GET    /featured          -> featured
/// GET    /{slug}            -> get_by_slug
/// PATCH  /{slug}            -> update (uploader only)
/// DELETE /{slug}            -> delete (uploader only)
/// POST   /{slug}/view       -> record_view
/// GET    /{slug}/comments   -> comment tree
/// GET    /{slug}/related    -> related videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(video::list).post(video::create))
        .route("/featured", get(video::featured))
        .route(
            "/{slug}",
            get(video::get_by_slug)
                .patch(video::update)
                .delete(video::delete),
        )
        .route("/{slug}/view", post(video::record_view))
        .route("/{slug}/comments", get(video::comments))
        .route("/{slug}/related", get(video::related))
}
