//! Handlers for the `/reports` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vakans_core::error::CoreError;
use vakans_core::events::TYPE_REPORT_FILED;
use vakans_core::status::{REPORT_DISMISSED, REPORT_OPEN, REPORT_RESOLVED};
use vakans_core::types::DbId;
use vakans_db::models::report::{CreateReport, Report, ResolveReport};
use vakans_db::repositories::ReportRepo;
use vakans_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::job::find_job;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the admin report listing.
#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    /// Defaults to `open`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/reports
///
/// File a report against a job posting.
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Report reason must not be empty".into(),
        )));
    }
    find_job(&state, input.job_id).await?;

    let report = ReportRepo::create(&state.pool, auth.user_id, input.job_id, &input.reason).await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_REPORT_FILED)
            .with_source("report", report.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({ "job_id": input.job_id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/reports
///
/// Admin queue of reports, oldest first.
pub async fn list_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ReportListQuery>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let paging = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let status = params.status.as_deref().unwrap_or(REPORT_OPEN);
    let reports =
        ReportRepo::list_by_status(&state.pool, status, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// PUT /api/v1/reports/{id}/resolve
///
/// Resolve or dismiss an open report. Admin only.
pub async fn resolve_report(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(report_id): Path<DbId>,
    Json(input): Json<ResolveReport>,
) -> AppResult<Json<DataResponse<Report>>> {
    if input.status != REPORT_RESOLVED && input.status != REPORT_DISMISSED {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Status must be '{REPORT_RESOLVED}' or '{REPORT_DISMISSED}'"
        ))));
    }

    // `resolve` only touches open reports; RowNotFound maps to 404 for
    // missing ids and already-resolved reports alike.
    let report = ReportRepo::resolve(&state.pool, report_id, &input.status, admin.user_id).await?;

    Ok(Json(DataResponse { data: report }))
}
