//! Persist-then-emit notification dispatcher.
//!
//! Domain handlers call [`NotificationDispatcher::dispatch`] inline: the
//! durable write must succeed or the triggering request fails, so dispatch
//! cannot live behind the asynchronous event bus. Only after the row is
//! committed is the realtime push attempted — a client that receives the
//! WebSocket event can always read the same notification via the listing
//! endpoint.

use std::sync::Arc;

use vakans_core::types::DbId;
use vakans_db::repositories::NotificationRepo;
use vakans_db::DbPool;

use crate::ws::{ConnectionRegistry, EmitStatus};

/// How a dispatched notification reached the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Stored durably and pushed to this many live connections.
    Realtime(usize),
    /// Stored durably; the user had no live connection. Recovered when the
    /// client next polls the listing endpoint.
    StoredOnly,
}

/// Routes domain events into durable notifications plus a realtime hint.
pub struct NotificationDispatcher {
    pool: DbPool,
    registry: Arc<ConnectionRegistry>,
}

impl NotificationDispatcher {
    /// Create a dispatcher over the given pool and gateway registry.
    pub fn new(pool: DbPool, registry: Arc<ConnectionRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Persist a notification for `user_id`, then push it over the gateway.
    ///
    /// The INSERT error propagates to the caller — the triggering request
    /// must fail rather than leave a phantom realtime event. Emission
    /// failure is non-fatal and never retried.
    pub async fn dispatch(
        &self,
        user_id: DbId,
        notification_type: &str,
        ws_event: &str,
        payload: serde_json::Value,
    ) -> Result<Delivery, sqlx::Error> {
        let row = NotificationRepo::create(&self.pool, user_id, notification_type, &payload).await?;

        let data = serde_json::json!({
            "id": row.id,
            "notification_type": row.notification_type,
            "payload": row.payload,
            "created_at": row.created_at,
        });

        match self.registry.emit_to_user(user_id, ws_event, &data).await {
            EmitStatus::Delivered(count) => Ok(Delivery::Realtime(count)),
            EmitStatus::NoActiveConnection => {
                tracing::debug!(
                    user_id,
                    notification_type,
                    "No live connection; notification stored for polling"
                );
                Ok(Delivery::StoredOnly)
            }
        }
    }

    /// Fan a notification out to several users (e.g. category followers).
    ///
    /// Each user gets the same persist-then-emit treatment; the first
    /// failed INSERT aborts the remainder and propagates.
    pub async fn dispatch_to_many(
        &self,
        user_ids: &[DbId],
        notification_type: &str,
        ws_event: &str,
        payload: &serde_json::Value,
    ) -> Result<usize, sqlx::Error> {
        let mut realtime = 0;
        for &user_id in user_ids {
            if let Delivery::Realtime(_) = self
                .dispatch(user_id, notification_type, ws_event, payload.clone())
                .await?
            {
                realtime += 1;
            }
        }
        Ok(realtime)
    }
}
