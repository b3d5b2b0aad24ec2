//! Integration tests for chat rooms and message delivery.
//!
//! Messages are persisted before any relay; a closed room rejects sends
//! with a conflict and writes nothing.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, test_config, test_state};
use sqlx::PgPool;
use vakans_api::router::build_app_router;
use vakans_api::state::AppState;
use vakans_core::roles::{ROLE_CANDIDATE, ROLE_EMPLOYER};
use vakans_core::status::JOB_APPROVED;
use vakans_core::types::DbId;
use vakans_db::models::application::CreateApplication;
use vakans_db::models::category::CreateCategory;
use vakans_db::models::job::CreateJob;
use vakans_db::repositories::{ApplicationRepo, CategoryRepo, ChatRepo, JobRepo, NotificationRepo};

/// Seed an employer, a candidate, an approved job, and an application.
/// Returns (employer_id, candidate_id, job_id).
async fn seed_job_with_applicant(pool: &PgPool) -> (DbId, DbId, DbId) {
    let (employer, _) = create_test_user(pool, "chat_employer", ROLE_EMPLOYER).await;
    let (candidate, _) = create_test_user(pool, "chat_candidate", ROLE_CANDIDATE).await;

    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "Engineering".into(),
            slug: "engineering".into(),
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
            title: "Backend Engineer".into(),
            description: "Build the backend".into(),
            salary_min: None,
            salary_max: None,
            location: None,
            employment_type: None,
        },
    )
    .await
    .expect("job creation should succeed");
    JobRepo::set_status(pool, job.id, JOB_APPROVED)
        .await
        .expect("approval should succeed");

    ApplicationRepo::create(pool, job.id, candidate.id, &CreateApplication {
        cover_letter: None,
        resume_url: None,
    })
    .await
    .expect("application should succeed");

    (employer.id, candidate.id, job.id)
}

async fn token_of(app: axum::Router, username: &str) -> String {
    let auth = common::login_user(app, username, "test_password_123!").await;
    auth["access_token"].as_str().expect("token").to_string()
}

fn app_of(state: &AppState) -> axum::Router {
    build_app_router(state.clone(), &test_config())
}

// ---------------------------------------------------------------------------
// Room lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn employer_opens_room_with_applicant(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (_, candidate_id, job_id) = seed_job_with_applicant(&pool).await;
    let token = token_of(app.clone(), "chat_employer").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/chat/rooms",
        &token,
        serde_json::json!({ "job_id": job_id, "candidate_id": candidate_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "open");

    // Opening a second room for the same pair conflicts.
    let response = post_json_auth(
        app,
        "/api/v1/chat/rooms",
        &token,
        serde_json::json!({ "job_id": job_id, "candidate_id": candidate_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn room_requires_an_application(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (_, _, job_id) = seed_job_with_applicant(&pool).await;
    let (stranger, _) = create_test_user(&pool, "no_application", ROLE_CANDIDATE).await;
    let token = token_of(app.clone(), "chat_employer").await;

    let response = post_json_auth(
        app,
        "/api/v1/chat/rooms",
        &token,
        serde_json::json!({ "job_id": job_id, "candidate_id": stranger.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Message delivery
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sent_message_is_persisted_and_notifies_the_peer(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (employer_id, candidate_id, job_id) = seed_job_with_applicant(&pool).await;
    let room = ChatRepo::create_room(&pool, job_id, employer_id, candidate_id)
        .await
        .expect("room creation should succeed");
    let token = token_of(app.clone(), "chat_employer").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/chat/rooms/{}/messages", room.id),
        &token,
        serde_json::json!({ "body": "When can you start?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Persisted message is the record of truth.
    let response = get_auth(
        app,
        &format!("/api/v1/chat/rooms/{}/messages", room.id),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let messages = json["data"].as_array().expect("array");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["body"], "When can you start?");

    // The peer holds a durable chat.message notification even though no
    // socket was connected.
    let rows = NotificationRepo::list_for_user(&pool, candidate_id, true, 10, 0)
        .await
        .expect("listing should succeed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].notification_type, "chat.message");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_room_rejects_sends(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (employer_id, candidate_id, job_id) = seed_job_with_applicant(&pool).await;
    let room = ChatRepo::create_room(&pool, job_id, employer_id, candidate_id)
        .await
        .expect("room creation should succeed");
    let token = token_of(app.clone(), "chat_candidate").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/chat/rooms/{}/close", room.id),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // A send into the closed room fails with a conflict...
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/chat/rooms/{}/messages", room.id),
        &token,
        serde_json::json!({ "body": "too late" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // ...and nothing was written.
    let messages = ChatRepo::list_messages(&pool, room.id, 10, 0)
        .await
        .expect("listing should succeed");
    assert!(messages.is_empty());

    // Closing twice is a conflict as well.
    let response = post_json_auth(
        app,
        &format!("/api/v1/chat/rooms/{}/close", room.id),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_participant_cannot_send_or_read(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = app_of(&state);
    let (employer_id, candidate_id, job_id) = seed_job_with_applicant(&pool).await;
    let room = ChatRepo::create_room(&pool, job_id, employer_id, candidate_id)
        .await
        .expect("room creation should succeed");

    create_test_user(&pool, "lurker", ROLE_CANDIDATE).await;
    let token = token_of(app.clone(), "lurker").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/chat/rooms/{}/messages", room.id),
        &token,
        serde_json::json!({ "body": "hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        app,
        &format!("/api/v1/chat/rooms/{}/messages", room.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
