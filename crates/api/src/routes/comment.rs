//! Route definitions for the `/comments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /      -> list (tree with ?video={slug})
/// POST   /      -> create (requires auth)
/// PATCH  /{id}  -> update (author only)
/// DELETE /{id}  -> delete (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comment::list).post(comment::create))
        .route("/{id}", axum::routing::patch(comment::update).delete(comment::delete))
}
