//! WebSocket upgrade handler and per-connection event loop.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use vakans_core::error::CoreError;
use vakans_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::handlers::chat;
use crate::state::AppState;

/// Query parameters for the WebSocket upgrade request.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// JWT access token obtained from a prior login.
    pub token: String,
}

/// Events a client may emit into the socket, as JSON text frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ClientEvent {
    /// Start receiving `new_message` events for a room.
    #[serde(rename = "chat.join")]
    ChatJoin { room_id: DbId },
    /// Stop receiving events for a room.
    #[serde(rename = "chat.leave")]
    ChatLeave { room_id: DbId },
    /// Send a message into a room (same persistence path as the REST
    /// endpoint).
    #[serde(rename = "chat.send")]
    ChatSend { room_id: DbId, body: String },
}

/// HTTP handler that authenticates and upgrades the connection to WebSocket.
///
/// The token is validated *before* the upgrade: an invalid or missing token
/// rejects the request with 401 and no connection is ever registered.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let claims = validate_token(&params.token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, claims.sub)))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the registry under the user's id.
///   2. Spawns a sender task that forwards messages from the registry channel.
///   3. Processes inbound client events on the current task.
///   4. Cleans up on disconnect (removes exactly this connection's entry).
async fn handle_socket(socket: WebSocket, state: AppState, user_id: DbId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = state.registry.add(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_client_event(&state, &conn_id, user_id, text.as_str()).await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    state.registry.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket disconnected");
}

/// Dispatch a single inbound client event.
///
/// Failures (bad JSON, closed room, non-participant) are reported back on
/// the same connection as an `error` event and never tear the socket down.
async fn handle_client_event(state: &AppState, conn_id: &str, user_id: DbId, text: &str) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Malformed client event");
            emit_error(state, user_id, "Malformed event").await;
            return;
        }
    };

    let result = match event {
        ClientEvent::ChatJoin { room_id } => chat::join_room(state, conn_id, user_id, room_id).await,
        ClientEvent::ChatLeave { room_id } => {
            state.registry.leave_room(conn_id, room_id).await;
            Ok(())
        }
        ClientEvent::ChatSend { room_id, body } => {
            chat::deliver_message(state, user_id, room_id, &body)
                .await
                .map(|_| ())
        }
    };

    if let Err(e) = result {
        tracing::debug!(conn_id = %conn_id, error = %e, "Client event rejected");
        emit_error(state, user_id, &e.to_string()).await;
    }
}

/// Push an `error` event to the user's connections.
async fn emit_error(state: &AppState, user_id: DbId, message: &str) {
    state
        .registry
        .emit_to_user(user_id, "error", &serde_json::json!({ "message": message }))
        .await;
}
