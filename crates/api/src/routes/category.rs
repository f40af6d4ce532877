//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET /            -> list
/// GET /{slug}         -> get_by_slug
/// GET /{slug}/videos  -> videos
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list))
        .route("/{slug}", get(category::get_by_slug))
        .route("/{slug}/videos", get(category::videos))
}
