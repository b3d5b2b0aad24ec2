//! Vakans event bus and audit-persistence infrastructure.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` audit table.
//!
//! Notification delivery is intentionally NOT routed through the bus: the
//! dispatcher's durable write must be able to fail the triggering request,
//! so API handlers invoke it inline and publish here only for the audit
//! trail.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
