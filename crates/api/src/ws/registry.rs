//! In-memory registry of live WebSocket connections.

use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use vakans_core::types::{DbId, Timestamp};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single authenticated WebSocket connection.
pub struct Connection {
    /// The authenticated user. Sockets register only after token
    /// validation, so this is never absent.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// Chat rooms this connection has joined.
    pub rooms: HashSet<DbId>,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Result of a targeted emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// Sent to this many live connections.
    Delivered(usize),
    /// The user has no live connection; nothing was sent. The caller is
    /// responsible for having already persisted the underlying state.
    NoActiveConnection,
}

/// Maps user identities to their live connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// passed into components explicitly (no module-level singleton), so tests
/// can run isolated instances and teardown is just dropping the `Arc`.
///
/// A user may hold several simultaneous connections (tabs, devices). A
/// failed send marks the connection stale and removes exactly that entry;
/// there are no retries — the durable notification row is the fallback.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, Connection>>,
}

impl ConnectionRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new authenticated connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Connection {
            user_id,
            sender: tx,
            rooms: HashSet::new(),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    ///
    /// Other connections of the same user are untouched; the user stays
    /// "connected" while any remain.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Whether the user has at least one live connection.
    pub async fn is_user_connected(&self, user_id: DbId) -> bool {
        self.connections
            .read()
            .await
            .values()
            .any(|conn| conn.user_id == user_id)
    }

    /// Join a connection to a chat room. No-op for unknown connections.
    pub async fn join_room(&self, conn_id: &str, room_id: DbId) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.rooms.insert(room_id);
        }
    }

    /// Remove a connection from a chat room. No-op for unknown connections.
    pub async fn leave_room(&self, conn_id: &str, room_id: DbId) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.rooms.remove(&room_id);
        }
    }

    /// Send a named event to every live connection of a user.
    ///
    /// Returns [`EmitStatus::NoActiveConnection`] when the user has no
    /// connection at all; performs no durable side effect either way.
    /// Connections whose channels are closed are dropped from the registry
    /// and do not count as deliveries.
    pub async fn emit_to_user(
        &self,
        user_id: DbId,
        event: &str,
        data: &serde_json::Value,
    ) -> EmitStatus {
        let message = envelope(event, data);
        let mut conns = self.connections.write().await;

        let targets: Vec<String> = conns
            .iter()
            .filter(|(_, c)| c.user_id == user_id)
            .map(|(id, _)| id.clone())
            .collect();

        if targets.is_empty() {
            return EmitStatus::NoActiveConnection;
        }

        let mut delivered = 0;
        for conn_id in targets {
            let stale = match conns.get(&conn_id) {
                Some(conn) => conn.sender.send(message.clone()).is_err(),
                None => continue,
            };
            if stale {
                tracing::debug!(conn_id = %conn_id, "Dropping stale connection");
                conns.remove(&conn_id);
            } else {
                delivered += 1;
            }
        }

        if delivered == 0 {
            EmitStatus::NoActiveConnection
        } else {
            EmitStatus::Delivered(delivered)
        }
    }

    /// Send a named event to every connection joined to a chat room.
    ///
    /// Returns the number of connections the message was sent to. Stale
    /// connections are removed, not retried.
    pub async fn broadcast_room(
        &self,
        room_id: DbId,
        event: &str,
        data: &serde_json::Value,
    ) -> usize {
        let message = envelope(event, data);
        let mut conns = self.connections.write().await;

        let targets: Vec<String> = conns
            .iter()
            .filter(|(_, c)| c.rooms.contains(&room_id))
            .map(|(id, _)| id.clone())
            .collect();

        let mut delivered = 0;
        for conn_id in targets {
            let stale = match conns.get(&conn_id) {
                Some(conn) => conn.sender.send(message.clone()).is_err(),
                None => continue,
            };
            if stale {
                tracing::debug!(conn_id = %conn_id, "Dropping stale connection");
                conns.remove(&conn_id);
            } else {
                delivered += 1;
            }
        }
        delivered
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `{"event": ..., "data": ...}` wire envelope.
fn envelope(event: &str, data: &serde_json::Value) -> Message {
    let msg = serde_json::json!({
        "event": event,
        "data": data,
    });
    Message::Text(msg.to_string().into())
}
