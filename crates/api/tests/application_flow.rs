//! Integration tests for the application lifecycle and its notifications.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, post_json_auth, put_json_auth, test_config, test_state,
};
use sqlx::PgPool;
use vakans_api::router::build_app_router;
use vakans_api::state::AppState;
use vakans_core::roles::{ROLE_CANDIDATE, ROLE_EMPLOYER};
use vakans_core::status::JOB_APPROVED;
use vakans_core::types::DbId;
use vakans_db::models::category::CreateCategory;
use vakans_db::models::job::CreateJob;
use vakans_db::repositories::{CategoryRepo, JobRepo, NotificationRepo};

/// Seed an employer and an approved job. Returns (employer_id, job_id).
async fn seed_approved_job(pool: &PgPool) -> (DbId, DbId) {
    let (employer, _) = create_test_user(pool, "app_employer", ROLE_EMPLOYER).await;
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "Sales".into(),
            slug: "sales".into(),
            description: None,
        },
    )
    .await
    .expect("category creation should succeed");

    let job = JobRepo::create(
        pool,
        employer.id,
        &CreateJob {
            category_id: category.id,
            title: "Account Manager".into(),
            description: "Manage accounts".into(),
            salary_min: Some(1000),
            salary_max: Some(2000),
            location: Some("Tashkent".into()),
            employment_type: Some("full-time".into()),
        },
    )
    .await
    .expect("job creation should succeed");
    JobRepo::set_status(pool, job.id, JOB_APPROVED)
        .await
        .expect("approval should succeed");

    (employer.id, job.id)
}

fn app_of(state: &AppState) -> axum::Router {
    build_app_router(state.clone(), &test_config())
}

async fn token_of(app: axum::Router, username: &str) -> String {
    let auth = common::login_user(app, username, "test_password_123!").await;
    auth["access_token"].as_str().expect("token").to_string()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn applying_notifies_the_employer_durably(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (employer_id, job_id) = seed_approved_job(&pool).await;
    create_test_user(&pool, "hopeful", ROLE_CANDIDATE).await;
    let token = token_of(app.clone(), "hopeful").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/jobs/{job_id}/applications"),
        &token,
        serde_json::json!({ "cover_letter": "Hire me" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "submitted");

    // The employer holds the durable notification even with no socket.
    let rows = NotificationRepo::list_for_user(&pool, employer_id, true, 10, 0)
        .await
        .expect("listing should succeed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].notification_type, "application.submitted");
    assert_eq!(rows[0].payload["job_id"], job_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_application_conflicts(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (_, job_id) = seed_approved_job(&pool).await;
    create_test_user(&pool, "eager", ROLE_CANDIDATE).await;
    let token = token_of(app.clone(), "eager").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/jobs/{job_id}/applications"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        app,
        &format!("/api/v1/jobs/{job_id}/applications"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pending_job_accepts_no_applications(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (employer, _) = create_test_user(&pool, "slow_employer", ROLE_EMPLOYER).await;
    let category = CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Legal".into(),
            slug: "legal".into(),
            description: None,
        },
    )
    .await
    .expect("category creation should succeed");
    let job = JobRepo::create(
        &pool,
        employer.id,
        &CreateJob {
            category_id: category.id,
            title: "Paralegal".into(),
            description: "Pending review".into(),
            salary_min: None,
            salary_max: None,
            location: None,
            employment_type: None,
        },
    )
    .await
    .expect("job creation should succeed");

    create_test_user(&pool, "too_early", ROLE_CANDIDATE).await;
    let token = token_of(app.clone(), "too_early").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/jobs/{}/applications", job.id),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Review transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_notifies_the_candidate(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (_, job_id) = seed_approved_job(&pool).await;
    let (candidate, _) = create_test_user(&pool, "awaiting", ROLE_CANDIDATE).await;
    let candidate_token = token_of(app.clone(), "awaiting").await;
    let employer_token = token_of(app.clone(), "app_employer").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/jobs/{job_id}/applications"),
        &candidate_token,
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    let application_id = json["data"]["id"].as_i64().expect("id");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{application_id}/status"),
        &employer_token,
        serde_json::json!({ "status": "accepted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "accepted");

    let rows = NotificationRepo::list_for_user(&pool, candidate.id, true, 10, 0)
        .await
        .expect("listing should succeed");
    assert!(rows
        .iter()
        .any(|n| n.notification_type == "application.status_changed"
            && n.payload["status"] == "accepted"));

    // Terminal states never transition again.
    let response = put_json_auth(
        app,
        &format!("/api/v1/applications/{application_id}/status"),
        &employer_token,
        serde_json::json!({ "status": "reviewed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_owning_employer_reviews(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (_, job_id) = seed_approved_job(&pool).await;
    create_test_user(&pool, "applicant", ROLE_CANDIDATE).await;
    create_test_user(&pool, "rival_employer", ROLE_EMPLOYER).await;
    let candidate_token = token_of(app.clone(), "applicant").await;
    let rival_token = token_of(app.clone(), "rival_employer").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/jobs/{job_id}/applications"),
        &candidate_token,
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    let application_id = json["data"]["id"].as_i64().expect("id");

    let response = put_json_auth(
        app,
        &format!("/api/v1/applications/{application_id}/status"),
        &rival_token,
        serde_json::json!({ "status": "reviewed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
