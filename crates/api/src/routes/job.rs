//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{application, job};
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                   -> list_jobs (public, approved only)
/// POST   /                   -> create_job (employer)
/// GET    /mine               -> list_my_jobs (employer)
/// GET    /{id}               -> get_job
/// PUT    /{id}               -> update_job (owner)
/// DELETE /{id}               -> delete_job (owner/admin)
/// POST   /{id}/close         -> close_job (owner)
/// POST   /{id}/applications  -> apply (candidate)
/// GET    /{id}/applications  -> list_for_job (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(job::list_jobs).post(job::create_job))
        .route("/mine", get(job::list_my_jobs))
        .route(
            "/{id}",
            get(job::get_job).put(job::update_job).delete(job::delete_job),
        )
        .route("/{id}/close", post(job::close_job))
        .route(
            "/{id}/applications",
            post(application::apply).get(application::list_for_job),
        )
}
