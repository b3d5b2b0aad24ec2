//! Route definitions for the `/reports` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /               -> create_report
/// GET  /               -> list_reports (admin)
/// PUT  /{id}/resolve   -> resolve_report (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::list_reports).post(report::create_report))
        .route("/{id}/resolve", put(report::resolve_report))
}
