//! Route definitions for admin moderation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin role.
///
/// ```text
/// GET  /jobs               -> list_jobs (moderation queue)
/// POST /jobs/{id}/approve  -> approve_job
/// POST /jobs/{id}/reject   -> reject_job
/// GET  /users              -> list_users
/// POST /users/{id}/ban     -> ban_user
/// POST /users/{id}/unban   -> unban_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(admin::list_jobs))
        .route("/jobs/{id}/approve", post(admin::approve_job))
        .route("/jobs/{id}/reject", post(admin::reject_job))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", post(admin::ban_user))
        .route("/users/{id}/unban", post(admin::unban_user))
}
