//! Push-notification payload handling.
//!
//! A push payload is a JSON object with optional `title`, `body`, and `url`
//! fields. It is rendered to an OS-level notification; clicking it either
//! focuses an already-open client window showing the target URL or opens a
//! new one. That is the only reconciliation between push payloads and open
//! application instances.

use serde::{Deserialize, Serialize};

/// Fallback title when the payload carries none.
const DEFAULT_TITLE: &str = "Vakans";

/// Fallback click target when the payload carries none.
const DEFAULT_TARGET: &str = "/";

/// The wire format of a push payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
}

impl PushPayload {
    /// Parse a raw push payload.
    ///
    /// Malformed or empty payloads degrade to an all-default notification
    /// rather than being dropped, so a push is never silently lost to a
    /// serialization bug on the sending side.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }

    /// Render the OS notification content.
    pub fn notification(&self) -> OsNotification {
        OsNotification {
            title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.into()),
            body: self.body.clone().unwrap_or_default(),
            target_url: self.url.clone().unwrap_or_else(|| DEFAULT_TARGET.into()),
        }
    }
}

/// Content displayed on the OS notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsNotification {
    pub title: String,
    pub body: String,
    pub target_url: String,
}

/// An open client window, as reported by the host environment.
#[derive(Debug, Clone)]
pub struct ClientWindow {
    pub id: u64,
    pub url: String,
}

/// What to do when the user clicks the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Focus the identified already-open window.
    Focus(u64),
    /// Open a new window at the target URL.
    OpenNew(String),
}

/// Resolve a notification click against the set of open windows.
///
/// The first window whose URL matches the target is focused; otherwise a
/// new window is opened at the target.
pub fn resolve_click(target_url: &str, windows: &[ClientWindow]) -> ClickAction {
    windows
        .iter()
        .find(|w| w.url == target_url)
        .map(|w| ClickAction::Focus(w.id))
        .unwrap_or_else(|| ClickAction::OpenNew(target_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_round_trips_to_notification() {
        let raw = br#"{"title": "New message", "body": "Hello", "url": "/chat/5"}"#;
        let notification = PushPayload::parse(raw).notification();

        assert_eq!(notification.title, "New message");
        assert_eq!(notification.body, "Hello");
        assert_eq!(notification.target_url, "/chat/5");
    }

    #[test]
    fn malformed_payload_degrades_to_defaults() {
        let notification = PushPayload::parse(b"not json").notification();

        assert_eq!(notification.title, DEFAULT_TITLE);
        assert_eq!(notification.body, "");
        assert_eq!(notification.target_url, DEFAULT_TARGET);
    }

    #[test]
    fn click_focuses_matching_window() {
        let windows = vec![
            ClientWindow { id: 1, url: "/jobs".into() },
            ClientWindow { id: 2, url: "/chat/5".into() },
        ];

        assert_eq!(resolve_click("/chat/5", &windows), ClickAction::Focus(2));
    }

    #[test]
    fn click_opens_new_window_when_none_match() {
        let windows = vec![ClientWindow { id: 1, url: "/jobs".into() }];

        assert_eq!(
            resolve_click("/chat/5", &windows),
            ClickAction::OpenNew("/chat/5".to_string())
        );
    }

    #[test]
    fn click_with_no_open_windows_opens_new() {
        assert_eq!(resolve_click("/", &[]), ClickAction::OpenNew("/".to_string()));
    }
}
