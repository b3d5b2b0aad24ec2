//! Handlers for admin moderation (`/admin`): the job queue and user bans.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vakans_core::error::CoreError;
use vakans_core::events::{
    EVENT_JOB_UPDATE, TYPE_JOB_APPROVED, TYPE_JOB_REJECTED, TYPE_USER_BANNED,
};
use vakans_core::status::{check_job_moderation, JOB_APPROVED, JOB_PENDING, JOB_REJECTED};
use vakans_core::types::DbId;
use vakans_db::models::job::Job;
use vakans_db::models::user::UserResponse;
use vakans_db::repositories::{CategoryRepo, JobRepo, SessionRepo, UserRepo};
use vakans_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::job::find_job;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the moderation queue.
#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    /// Defaults to `pending`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/jobs
///
/// The moderation queue, oldest first.
pub async fn list_jobs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ModerationQuery>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let paging = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let status = params.status.as_deref().unwrap_or(JOB_PENDING);
    let jobs = JobRepo::list_by_status(&state.pool, status, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// POST /api/v1/admin/jobs/{id}/approve
///
/// Approve a pending job and fan a `job_update` notification out to every
/// follower of its category.
pub async fn approve_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = find_job(&state, job_id).await?;
    check_job_moderation(&job.status, JOB_APPROVED)?;

    let approved = JobRepo::set_status(&state.pool, job_id, JOB_APPROVED).await?;

    // Followers of the job's category get a durable notification each,
    // with a best-effort live push on top.
    let followers = CategoryRepo::follower_ids(&state.pool, approved.category_id).await?;
    state
        .dispatcher
        .dispatch_to_many(
            &followers,
            TYPE_JOB_APPROVED,
            EVENT_JOB_UPDATE,
            &serde_json::json!({
                "job_id": approved.id,
                "title": approved.title,
                "category_id": approved.category_id,
            }),
        )
        .await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_JOB_APPROVED)
            .with_source("job", job_id)
            .with_actor(admin.user_id),
    );

    Ok(Json(DataResponse { data: approved }))
}

/// POST /api/v1/admin/jobs/{id}/reject
///
/// Reject a pending job.
pub async fn reject_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = find_job(&state, job_id).await?;
    check_job_moderation(&job.status, JOB_REJECTED)?;

    let rejected = JobRepo::set_status(&state.pool, job_id, JOB_REJECTED).await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_JOB_REJECTED)
            .with_source("job", job_id)
            .with_actor(admin.user_id),
    );

    Ok(Json(DataResponse { data: rejected }))
}

/// GET /api/v1/admin/users
///
/// List platform users with their role names.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_with_role(&state.pool, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users/{id}/ban
///
/// Deactivate an account and revoke its sessions.
pub async fn ban_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if user_id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Admins cannot ban themselves".into(),
        )));
    }

    let found = UserRepo::set_active(&state.pool, user_id, false).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, user_id).await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_USER_BANNED)
            .with_source("user", user_id)
            .with_actor(admin.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/unban
///
/// Reactivate a banned account.
pub async fn unban_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let found = UserRepo::set_active(&state.pool, user_id, true).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
