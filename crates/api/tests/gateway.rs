//! Unit tests for `ConnectionRegistry`.
//!
//! These tests exercise the gateway's connection registry directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, per-user
//! fan-out, stale-connection eviction, room broadcast, and graceful
//! shutdown behaviour.

use axum::extract::ws::Message;
use vakans_api::ws::{ConnectionRegistry, EmitStatus};

/// Extract the `event` field from a wire envelope.
fn event_of(message: &Message) -> String {
    match message {
        Message::Text(text) => {
            let value: serde_json::Value =
                serde_json::from_str(text.as_str()).expect("envelope should be JSON");
            value["event"].as_str().expect("event field").to_string()
        }
        other => panic!("Expected Text message, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: add/remove bookkeeping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let registry = ConnectionRegistry::new();
    assert_eq!(registry.connection_count().await, 0);

    let _rx = registry.add("conn-1".to_string(), 1).await;
    assert_eq!(registry.connection_count().await, 1);

    registry.remove("conn-1").await;
    assert_eq!(registry.connection_count().await, 0);
}

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let registry = ConnectionRegistry::new();

    let _rx = registry.add("conn-1".to_string(), 1).await;
    registry.remove("nonexistent").await;

    assert_eq!(registry.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: a user with two connections receives the event on both sockets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn emit_fans_out_to_all_of_a_users_connections() {
    let registry = ConnectionRegistry::new();

    let mut rx_tab = registry.add("conn-tab".to_string(), 7).await;
    let mut rx_phone = registry.add("conn-phone".to_string(), 7).await;
    let mut rx_other = registry.add("conn-other".to_string(), 8).await;

    let status = registry
        .emit_to_user(7, "notification", &serde_json::json!({ "id": 1 }))
        .await;
    assert_eq!(status, EmitStatus::Delivered(2));

    let msg_tab = rx_tab.recv().await.expect("tab should receive");
    let msg_phone = rx_phone.recv().await.expect("phone should receive");
    assert_eq!(event_of(&msg_tab), "notification");
    assert_eq!(event_of(&msg_phone), "notification");

    // The other user's connection must stay silent.
    assert!(rx_other.try_recv().is_err(), "user 8 must not receive");
}

// ---------------------------------------------------------------------------
// Test: emitting to a user with no connections reports NoActiveConnection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn emit_without_connections_reports_no_active_connection() {
    let registry = ConnectionRegistry::new();

    let status = registry
        .emit_to_user(42, "notification", &serde_json::json!({}))
        .await;

    assert_eq!(status, EmitStatus::NoActiveConnection);
}

// ---------------------------------------------------------------------------
// Test: a stale connection is evicted on send; others are unaffected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stale_connection_is_removed_on_failed_send() {
    let registry = ConnectionRegistry::new();

    let rx_stale = registry.add("conn-stale".to_string(), 7).await;
    let mut rx_live = registry.add("conn-live".to_string(), 7).await;
    drop(rx_stale); // half-closed socket: sends will fail

    let status = registry
        .emit_to_user(7, "notification", &serde_json::json!({}))
        .await;

    // Only the live connection counts as a delivery...
    assert_eq!(status, EmitStatus::Delivered(1));
    assert!(rx_live.recv().await.is_some());

    // ...and the stale one is gone from the registry.
    assert_eq!(registry.connection_count().await, 1);
}

#[tokio::test]
async fn user_with_only_stale_connections_reports_no_active_connection() {
    let registry = ConnectionRegistry::new();

    let rx = registry.add("conn-stale".to_string(), 7).await;
    drop(rx);

    let status = registry
        .emit_to_user(7, "notification", &serde_json::json!({}))
        .await;

    assert_eq!(status, EmitStatus::NoActiveConnection);
    assert_eq!(registry.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: one connection dropping leaves the user connected via the other
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disconnect_of_one_connection_keeps_user_connected() {
    let registry = ConnectionRegistry::new();

    let _rx1 = registry.add("conn-1".to_string(), 7).await;
    let _rx2 = registry.add("conn-2".to_string(), 7).await;

    registry.remove("conn-1").await;

    assert!(registry.is_user_connected(7).await);
}

// ---------------------------------------------------------------------------
// Test: room broadcast reaches joined connections only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_room_reaches_joined_connections_only() {
    let registry = ConnectionRegistry::new();

    let mut rx_a = registry.add("conn-a".to_string(), 1).await;
    let mut rx_b = registry.add("conn-b".to_string(), 2).await;
    let mut rx_c = registry.add("conn-c".to_string(), 3).await;

    registry.join_room("conn-a", 99).await;
    registry.join_room("conn-b", 99).await;

    let delivered = registry
        .broadcast_room(99, "new_message", &serde_json::json!({ "body": "hi" }))
        .await;
    assert_eq!(delivered, 2);

    assert_eq!(event_of(&rx_a.recv().await.expect("a receives")), "new_message");
    assert_eq!(event_of(&rx_b.recv().await.expect("b receives")), "new_message");
    assert!(rx_c.try_recv().is_err(), "non-member must not receive");
}

#[tokio::test]
async fn leave_room_stops_delivery() {
    let registry = ConnectionRegistry::new();

    let mut rx = registry.add("conn-a".to_string(), 1).await;
    registry.join_room("conn-a", 99).await;
    registry.leave_room("conn-a", 99).await;

    let delivered = registry
        .broadcast_room(99, "new_message", &serde_json::json!({}))
        .await;

    assert_eq!(delivered, 0);
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: shutdown_all sends Close and clears the registry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let registry = ConnectionRegistry::new();

    let mut rx1 = registry.add("conn-1".to_string(), 1).await;
    let mut rx2 = registry.add("conn-2".to_string(), 2).await;
    assert_eq!(registry.connection_count().await, 2);

    registry.shutdown_all().await;

    assert_eq!(registry.connection_count().await, 0);

    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(
        matches!(msg1, Message::Close(None)),
        "Expected Close(None), got: {msg1:?}"
    );

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(
        matches!(msg2, Message::Close(None)),
        "Expected Close(None), got: {msg2:?}"
    );

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}
