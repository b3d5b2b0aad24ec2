//! Route definitions for the `/applications` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET /mine          -> list_mine (candidate)
/// PUT /{id}/status   -> set_status (owning employer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(application::list_mine))
        .route("/{id}/status", put(application::set_status))
}
