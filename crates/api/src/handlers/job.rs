//! Handlers for the `/jobs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vakans_core::error::CoreError;
use vakans_core::events::{TYPE_JOB_CLOSED, TYPE_JOB_POSTED};
use vakans_core::roles::ROLE_ADMIN;
use vakans_core::status::{JOB_APPROVED, JOB_CLOSED};
use vakans_core::types::DbId;
use vakans_db::models::job::{CreateJob, Job, JobFilter, UpdateJob};
use vakans_db::repositories::{CategoryRepo, JobRepo};
use vakans_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEmployer;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /jobs`.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub category_id: Option<DbId>,
    /// Case-insensitive substring match against the job title.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/jobs
///
/// Public listing of approved jobs with optional filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let paging = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let filter = JobFilter {
        category_id: params.category_id,
        search: params.search,
    };
    let jobs =
        JobRepo::list_approved(&state.pool, &filter, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/mine
///
/// All of the authenticated employer's jobs, any status.
pub async fn list_my_jobs(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let jobs =
        JobRepo::list_for_employer(&state.pool, user.user_id, paging.limit(), paging.offset())
            .await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id}
///
/// Approved jobs are public; other statuses are visible only to the owner
/// and admins.
pub async fn get_job(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = find_job(&state, job_id).await?;

    if job.status != JOB_APPROVED {
        let allowed = auth
            .as_ref()
            .is_some_and(|u| u.user_id == job.employer_id || u.role == ROLE_ADMIN);
        if !allowed {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Job",
                id: job_id,
            }));
        }
    }

    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/jobs
///
/// Create a job posting. It enters moderation as `pending` and becomes
/// publicly visible only after admin approval.
pub async fn create_job(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Job title and description must not be empty".into(),
        )));
    }
    if let (Some(min), Some(max)) = (input.salary_min, input.salary_max) {
        if min > max {
            return Err(AppError::Core(CoreError::Validation(
                "salary_min must not exceed salary_max".into(),
            )));
        }
    }
    CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Category",
                id: input.category_id,
            })
        })?;

    let job = JobRepo::create(&state.pool, user.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_JOB_POSTED)
            .with_source("job", job.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "title": job.title, "category_id": job.category_id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// PUT /api/v1/jobs/{id}
///
/// Update a job posting. Owner only; the job returns to moderation.
pub async fn update_job(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Json(input): Json<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = find_job(&state, job_id).await?;
    require_owner(&job, &user)?;

    let updated = JobRepo::update(&state.pool, job_id, &input).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/jobs/{id}/close
///
/// Close an approved job. Owner only; closed jobs accept no applications.
pub async fn close_job(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = find_job(&state, job_id).await?;
    require_owner(&job, &user)?;

    if job.status == JOB_CLOSED {
        return Err(AppError::Core(CoreError::Conflict(
            "Job is already closed".into(),
        )));
    }

    let closed = JobRepo::set_status(&state.pool, job_id, JOB_CLOSED).await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_JOB_CLOSED)
            .with_source("job", job_id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse { data: closed }))
}

/// DELETE /api/v1/jobs/{id}
///
/// Delete a job posting. Owner or admin.
pub async fn delete_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let job = find_job(&state, job_id).await?;

    if job.employer_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner or an admin may delete a job".into(),
        )));
    }

    JobRepo::delete(&state.pool, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a job or 404.
pub(crate) async fn find_job(state: &AppState, job_id: DbId) -> AppResult<Job> {
    JobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Job",
                id: job_id,
            })
        })
}

/// Reject non-owners (admins included -- moderation uses its own routes).
fn require_owner(job: &Job, user: &AuthUser) -> AppResult<()> {
    if job.employer_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the job owner may modify it".into(),
        )));
    }
    Ok(())
}
