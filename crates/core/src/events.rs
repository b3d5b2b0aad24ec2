//! Well-known event name constants.
//!
//! `EVENT_*` are the names emitted over the WebSocket channel to browser
//! clients. `TYPE_*` are the dot-separated domain event types published on
//! the in-process event bus and stored in `events.event_type` and
//! `notifications.notification_type`.

/// WebSocket event: a notification was stored for the receiving user.
pub const EVENT_NOTIFICATION: &str = "notification";

/// WebSocket event: a chat message arrived in a room the client joined.
pub const EVENT_NEW_MESSAGE: &str = "new_message";

/// WebSocket event: a job in a followed category was published.
pub const EVENT_JOB_UPDATE: &str = "job_update";

/// WebSocket event: an application was submitted or changed status.
pub const EVENT_APPLICATION_UPDATE: &str = "application_update";

pub const TYPE_JOB_POSTED: &str = "job.posted";
pub const TYPE_JOB_APPROVED: &str = "job.approved";
pub const TYPE_JOB_REJECTED: &str = "job.rejected";
pub const TYPE_JOB_CLOSED: &str = "job.closed";
pub const TYPE_APPLICATION_SUBMITTED: &str = "application.submitted";
pub const TYPE_APPLICATION_STATUS_CHANGED: &str = "application.status_changed";
pub const TYPE_CHAT_MESSAGE: &str = "chat.message";
pub const TYPE_CHAT_ROOM_CLOSED: &str = "chat.room_closed";
pub const TYPE_REPORT_FILED: &str = "report.filed";
pub const TYPE_USER_BANNED: &str = "user.banned";
