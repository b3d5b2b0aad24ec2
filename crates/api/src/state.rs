use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::NotificationDispatcher;
use crate::ws::ConnectionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vakans_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Realtime gateway connection registry (browser clients).
    pub registry: Arc<ConnectionRegistry>,
    /// Persist-then-emit notification dispatcher.
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Centralized event bus for publishing audit events.
    pub event_bus: Arc<vakans_events::EventBus>,
}
