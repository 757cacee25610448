//! Transient user notifications (toasts)

use crate::types::Severity;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Something that can put a message in front of the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Board of active toasts. Each toast removes itself after the TTL.
#[derive(Clone)]
pub struct ToastBoard {
    ttl: Duration,
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            toasts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Insert a toast and arm its removal timer
    ///
    /// Outside a tokio runtime the toast stays until dismissed.
    pub fn show(&self, message: &str, severity: Severity) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.to_string(),
            severity,
            created_at: Utc::now(),
        };
        let id = toast.id;
        info!("Toast {}", toast);
        self.toasts.lock().push(toast);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let board = self.clone();
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                if board.dismiss(id) {
                    debug!("Toast {} expired", id);
                }
            });
        }

        id
    }

    /// Remove a toast early. Returns false if it is already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.toasts.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// Snapshot of the toasts currently shown, oldest first
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, message: &str, severity: Severity) {
        self.show(message, severity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_ttl() {
        let board = ToastBoard::new(Duration::from_secs(5));
        board.show("Saved", Severity::Success);
        assert_eq!(board.len(), 1);

        sleep(Duration::from_millis(4_900)).await;
        assert_eq!(board.len(), 1);

        sleep(Duration::from_millis(200)).await;
        assert!(board.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_coexist_and_expire_independently() {
        let board = ToastBoard::new(Duration::from_secs(5));
        board.show("first", Severity::Info);
        sleep(Duration::from_secs(2)).await;
        board.notify("second", Severity::Danger);

        let active = board.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[1].severity, Severity::Danger);

        sleep(Duration::from_millis(3_500)).await;
        let active = board.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");
    }

    #[tokio::test]
    async fn test_dismiss_early() {
        let board = ToastBoard::default();
        let id = board.show("bye", Severity::Info);
        assert!(board.dismiss(id));
        assert!(!board.dismiss(id));
        assert!(board.is_empty());
    }

    #[test]
    fn test_without_runtime_toast_stays() {
        let board = ToastBoard::new(Duration::from_millis(1));
        let id = board.show("sticky", Severity::Warning);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(board.active()[0].id, id);
        assert_eq!(board.active()[0].to_string(), "[warning] sticky");
    }
}
