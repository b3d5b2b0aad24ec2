//! Route definitions for the authenticated user's own profile.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET /me -> get_me
/// PUT /me -> update_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(user::get_me).put(user::update_me))
}
