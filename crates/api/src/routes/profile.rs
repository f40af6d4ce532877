//! Route definitions for profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile` -- the caller's own profile.
///
/// ```text
/// GET /  -> get_own (requires auth)
/// PUT /  -> update_own (requires auth)
/// ```
pub fn own_router() -> Router<AppState> {
    Router::new().route("/", get(profile::get_own).put(profile::update_own))
}

/// Routes mounted at `/profiles` -- public reads by username.
///
/// ```text
/// GET /{username}  -> get_by_username
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/{username}", get(profile::get_by_username))
}
