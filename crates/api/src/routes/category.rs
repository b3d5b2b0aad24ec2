//! Route definitions for the `/categories` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /             -> list_categories (public)
/// POST   /             -> create_category (admin)
/// POST   /{id}/follow  -> follow_category
/// DELETE /{id}/follow  -> unfollow_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/{id}/follow",
            post(category::follow_category).delete(category::unfollow_category),
        )
}
