use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::presence::PresenceTracker;
use crate::status::StatusStore;
use crate::toasts::NotificationStore;

/// Events produced by the gateway connection manager.
#[derive(Debug)]
pub enum GatewayEvent {
    /// Socket (re)established. The next frame replays current state,
    /// so the tracker re-arms its first-frame suppression.
    Connected,
    /// Raw presence frame payload.
    Frame(String),
}

/// Consumes gateway events, runs the diff engine, and publishes into
/// the two stores.
///
/// One frame is fully processed before the next is taken, so the
/// notification decision always runs against the prior snapshot and
/// readers never see a snapshot ahead of its toast decision.
pub async fn run_presence_pipeline(
    mut events: mpsc::Receiver<GatewayEvent>,
    status: StatusStore,
    toasts: NotificationStore,
    cancel: CancellationToken,
) {
    let mut tracker = PresenceTracker::new();
    loop {
        let event = tokio::select! {
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
            _ = cancel.cancelled() => break,
        };

        match event {
            GatewayEvent::Connected => tracker.mark_connected(),
            GatewayEvent::Frame(raw) => match tracker.handle_frame(&raw) {
                Ok(notifications) => {
                    status.replace(tracker.snapshot().clone());
                    for notification in notifications {
                        toasts.push(notification);
                    }
                }
                Err(e) => tracing::warn!("dropping presence frame: {}", e),
            },
        }
    }
    tracing::debug!("presence pipeline stopped");
}
