//! Notification dispatch infrastructure.
//!
//! The [`NotificationDispatcher`] persists a notification row and only then
//! attempts a best-effort realtime push through the gateway.

pub mod dispatcher;

pub use dispatcher::{Delivery, NotificationDispatcher};
