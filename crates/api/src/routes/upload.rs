//! Route definitions for file uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST / -> upload_file (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload_file))
}
