//! Integration tests for the notification dispatcher and endpoints.
//!
//! Covers the persist-then-emit contract: the durable row always exists,
//! realtime delivery is best-effort fan-out, and the listing endpoint is
//! the recovery path for missed pushes.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, test_config, test_state};
use sqlx::PgPool;
use vakans_api::notifications::Delivery;
use vakans_api::router::build_app_router;
use vakans_core::roles::ROLE_CANDIDATE;
use vakans_db::repositories::NotificationRepo;

// ---------------------------------------------------------------------------
// Dispatcher contract
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dispatch_without_connection_stores_durably(pool: PgPool) {
    let state = test_state(pool.clone());
    let (user, _) = create_test_user(&pool, "offline_user", ROLE_CANDIDATE).await;

    let delivery = state
        .dispatcher
        .dispatch(
            user.id,
            "application.submitted",
            "application_update",
            serde_json::json!({ "job_id": 1 }),
        )
        .await
        .expect("dispatch must succeed without connections");

    // No live connection: stored only, no error raised.
    assert_eq!(delivery, Delivery::StoredOnly);

    // The durable row is the source of truth and must exist.
    let rows = NotificationRepo::list_for_user(&pool, user.id, false, 10, 0)
        .await
        .expect("listing should succeed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].notification_type, "application.submitted");
    assert!(!rows[0].is_read);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dispatch_fans_out_to_every_connection_after_persisting(pool: PgPool) {
    let state = test_state(pool.clone());
    let (user, _) = create_test_user(&pool, "two_tabs", ROLE_CANDIDATE).await;

    let mut rx_tab = state.registry.add("conn-tab".to_string(), user.id).await;
    let mut rx_phone = state.registry.add("conn-phone".to_string(), user.id).await;

    let delivery = state
        .dispatcher
        .dispatch(
            user.id,
            "chat.message",
            "notification",
            serde_json::json!({ "room_id": 9 }),
        )
        .await
        .expect("dispatch should succeed");
    assert_eq!(delivery, Delivery::Realtime(2));

    // Both sockets got the event (fan-out, not first-match only)...
    for rx in [&mut rx_tab, &mut rx_phone] {
        let message = rx.recv().await.expect("connection should receive");
        let text = match message {
            axum::extract::ws::Message::Text(text) => text.to_string(),
            other => panic!("Expected Text, got {other:?}"),
        };
        let envelope: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(envelope["event"], "notification");

        // ...and the id it carries is already readable from the store,
        // because the emission happens only after the durable write.
        let emitted_id = envelope["data"]["id"].as_i64().expect("row id in payload");
        let rows = NotificationRepo::list_for_user(&pool, user.id, false, 10, 0)
            .await
            .expect("listing should succeed");
        assert!(rows.iter().any(|n| n.id == emitted_id));
    }
}

// ---------------------------------------------------------------------------
// HTTP endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_are_listed_and_marked_read(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = build_app_router(state.clone(), &test_config());

    let (user, password) = create_test_user(&pool, "reader", ROLE_CANDIDATE).await;
    let auth = common::login_user(app.clone(), "reader", &password).await;
    let token = auth["access_token"].as_str().expect("token");

    for i in 0..3 {
        state
            .dispatcher
            .dispatch(
                user.id,
                "job.approved",
                "job_update",
                serde_json::json!({ "job_id": i }),
            )
            .await
            .expect("dispatch should succeed");
    }

    // Unread count reflects the stored rows.
    let response = get_auth(app.clone(), "/api/v1/notifications/unread-count", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 3);

    // List and mark the first one read.
    let response = get_auth(app.clone(), "/api/v1/notifications", token).await;
    let json = body_json(response).await;
    let first_id = json["data"][0]["id"].as_i64().expect("id");

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/notifications/{first_id}/read"),
        token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // unread_only filtering excludes it now.
    let response = get_auth(
        app.clone(),
        "/api/v1/notifications?unread_only=true",
        token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("array").len(), 2);

    // read-all clears the rest.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/notifications/read-all",
        token,
        serde_json::json!({}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked_read"], 2);

    let response = get_auth(app, "/api/v1/notifications/unread-count", token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn marking_anothers_notification_is_not_found(pool: PgPool) {
    let state = test_state(pool.clone());
    let app = build_app_router(state.clone(), &test_config());

    let (owner, _) = create_test_user(&pool, "owner", ROLE_CANDIDATE).await;
    let (_, password) = create_test_user(&pool, "intruder", ROLE_CANDIDATE).await;
    let auth = common::login_user(app.clone(), "intruder", &password).await;
    let token = auth["access_token"].as_str().expect("token");

    state
        .dispatcher
        .dispatch(owner.id, "chat.message", "notification", serde_json::json!({}))
        .await
        .expect("dispatch should succeed");
    let rows = NotificationRepo::list_for_user(&pool, owner.id, false, 1, 0)
        .await
        .expect("listing should succeed");

    let response = post_json_auth(
        app,
        &format!("/api/v1/notifications/{}/read", rows[0].id),
        token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
