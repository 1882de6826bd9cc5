use std::time::Duration;

use pulseboard_models::notification::Notification;
use tokio::sync::watch;

/// How long a pushed toast stays visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Append-only, time-bounded collection of active toasts.
///
/// Each entry self-expires exactly `ttl` after its own push; entries do
/// not re-time each other. No cap, no coalescing. This is the
/// authoritative lifetime; display layers must not re-time entries.
#[derive(Clone)]
pub struct NotificationStore {
    tx: watch::Sender<Vec<Notification>>,
    ttl: Duration,
}

impl NotificationStore {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx, ttl }
    }

    /// Append a toast and schedule removal of that exact entry.
    pub fn push(&self, notification: Notification) {
        let id = notification.id;
        tracing::debug!(
            "toast {}: {} / {}",
            id,
            notification.headline,
            notification.body
        );
        self.tx.send_modify(|active| active.push(notification));

        let tx = self.tx.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            tx.send_modify(|active| active.retain(|n| n.id != id));
        });
    }

    /// Present ordered sequence of active toasts.
    pub fn current(&self) -> Vec<Notification> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.tx.subscribe()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}
