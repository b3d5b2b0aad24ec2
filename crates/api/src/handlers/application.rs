//! Handlers for the `/applications` resource.
//!
//! Application events are where the dispatcher's persist-then-emit contract
//! matters most: the employer (or candidate) notification row is written
//! before any WebSocket push, and a failed write fails the whole request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vakans_core::error::CoreError;
use vakans_core::events::{
    EVENT_APPLICATION_UPDATE, TYPE_APPLICATION_STATUS_CHANGED, TYPE_APPLICATION_SUBMITTED,
};
use vakans_core::status::{check_application_transition, JOB_APPROVED};
use vakans_core::types::DbId;
use vakans_db::models::application::{Application, CreateApplication, UpdateApplicationStatus};
use vakans_db::repositories::ApplicationRepo;
use vakans_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::job::find_job;
use crate::middleware::rbac::{RequireCandidate, RequireEmployer};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/jobs/{id}/applications
///
/// Submit an application to an approved job. Candidate only; one
/// application per (job, candidate) pair.
pub async fn apply(
    RequireCandidate(user): RequireCandidate,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Json(input): Json<CreateApplication>,
) -> AppResult<(StatusCode, Json<DataResponse<Application>>)> {
    let job = find_job(&state, job_id).await?;

    if job.status != JOB_APPROVED {
        return Err(AppError::Core(CoreError::Conflict(
            "Job is not open for applications".into(),
        )));
    }

    let application = ApplicationRepo::create(&state.pool, job_id, user.user_id, &input).await?;

    // Durable notification first; its failure fails this request.
    state
        .dispatcher
        .dispatch(
            job.employer_id,
            TYPE_APPLICATION_SUBMITTED,
            EVENT_APPLICATION_UPDATE,
            serde_json::json!({
                "application_id": application.id,
                "job_id": job.id,
                "job_title": job.title,
                "candidate_id": user.user_id,
            }),
        )
        .await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_APPLICATION_SUBMITTED)
            .with_source("application", application.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "job_id": job.id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// GET /api/v1/applications/mine
///
/// The authenticated candidate's applications, newest first.
pub async fn list_mine(
    RequireCandidate(user): RequireCandidate,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let applications = ApplicationRepo::list_for_candidate(
        &state.pool,
        user.user_id,
        paging.limit(),
        paging.offset(),
    )
    .await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/jobs/{id}/applications
///
/// Applications for a job. Owning employer only.
pub async fn list_for_job(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Application>>>> {
    let job = find_job(&state, job_id).await?;
    if job.employer_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the job owner may view its applications".into(),
        )));
    }

    let applications =
        ApplicationRepo::list_for_job(&state.pool, job_id, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// PUT /api/v1/applications/{id}/status
///
/// Move an application through its review lifecycle. Owning employer only.
pub async fn set_status(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Path(application_id): Path<DbId>,
    Json(input): Json<UpdateApplicationStatus>,
) -> AppResult<Json<DataResponse<Application>>> {
    let application = ApplicationRepo::find_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Application",
                id: application_id,
            })
        })?;

    let job = find_job(&state, application.job_id).await?;
    if job.employer_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the job owner may review its applications".into(),
        )));
    }

    check_application_transition(&application.status, &input.status)?;

    let updated = ApplicationRepo::set_status(&state.pool, application_id, &input.status).await?;

    state
        .dispatcher
        .dispatch(
            application.candidate_id,
            TYPE_APPLICATION_STATUS_CHANGED,
            EVENT_APPLICATION_UPDATE,
            serde_json::json!({
                "application_id": updated.id,
                "job_id": job.id,
                "job_title": job.title,
                "status": updated.status,
            }),
        )
        .await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_APPLICATION_STATUS_CHANGED)
            .with_source("application", updated.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "status": updated.status })),
    );

    Ok(Json(DataResponse { data: updated }))
}
