use pulseboard_models::notification::{Notification, NotificationKind};
use pulseboard_models::presence::{PresenceFrame, PresenceSnapshot};

use crate::ids;
use crate::CoreError;

/// Diffs incoming presence frames against the last held snapshot and
/// decides which toasts to surface.
///
/// Owned by the presence pipeline task, so the notification decision
/// and the snapshot replacement are atomic with respect to readers.
pub struct PresenceTracker {
    snapshot: PresenceSnapshot,
    /// The first frame after a (re)connection replays current state;
    /// surfacing toasts for it would just announce stale diffs.
    first_frame: bool,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            snapshot: PresenceSnapshot::default(),
            first_frame: true,
        }
    }

    /// Re-arm first-frame suppression. Called on every (re)connection.
    pub fn mark_connected(&mut self) {
        self.first_frame = true;
    }

    pub fn snapshot(&self) -> &PresenceSnapshot {
        &self.snapshot
    }

    /// Parse a raw frame, decide toasts against the prior snapshot,
    /// then replace it. The frame always becomes the new snapshot,
    /// whether or not anything fired. A frame that fails to parse is
    /// dropped without touching the snapshot.
    pub fn handle_frame(&mut self, raw: &str) -> Result<Vec<Notification>, CoreError> {
        let frame: PresenceFrame = serde_json::from_str(raw)?;
        let next = PresenceSnapshot::from_frame(&frame);

        let notifications = if self.first_frame {
            Vec::new()
        } else {
            self.diff(&next)
        };

        self.snapshot = next;
        self.first_frame = false;
        Ok(notifications)
    }

    fn diff(&self, next: &PresenceSnapshot) -> Vec<Notification> {
        let mut out = Vec::new();

        // A track toast needs something to have already been playing:
        // silence -> music is a session start, not a track change.
        if let (Some(track), Some(prior)) = (&next.track, &self.snapshot.track) {
            if track.title != prior.title {
                out.push(Notification {
                    id: ids::next_notification_id(),
                    kind: NotificationKind::TrackChange,
                    headline: "Now Playing".into(),
                    body: format!("{} — {}", track.title, track.artist),
                    artwork_url: track.artwork_url.clone(),
                });
            }
        }

        if let Some(game) = &next.game {
            let prior_name = self.snapshot.game.as_ref().map(|g| g.name.as_str());
            if prior_name != Some(game.name.as_str()) {
                out.push(Notification {
                    id: ids::next_notification_id(),
                    kind: NotificationKind::GameChange,
                    headline: "Started Playing".into(),
                    body: game.name.clone(),
                    artwork_url: game.artwork_url.clone(),
                });
            }
        }

        out
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseboard_models::presence::ConnectionStatus;

    fn listening_frame(title: &str, artist: &str) -> String {
        format!(
            r#"{{"status": "online", "activities": [
                {{"type": 2, "name": "Spotify", "details": "{title}", "state": "{artist}"}}
            ]}}"#
        )
    }

    fn playing_frame(game: &str) -> String {
        format!(r#"{{"status": "online", "activities": [{{"type": 0, "name": "{game}"}}]}}"#)
    }

    #[test]
    fn first_frame_after_connect_is_silent() {
        let mut tracker = PresenceTracker::new();
        let toasts = tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();

        assert!(toasts.is_empty());
        // Snapshot still updates.
        assert_eq!(tracker.snapshot().status, ConnectionStatus::Online);
        assert_eq!(tracker.snapshot().track.as_ref().unwrap().title, "Song A");
    }

    #[test]
    fn track_change_fires_with_new_title_and_artist() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();
        let toasts = tracker
            .handle_frame(&listening_frame("Song B", "Artist A"))
            .unwrap();

        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::TrackChange);
        assert_eq!(toasts[0].headline, "Now Playing");
        assert!(toasts[0].body.contains("Song B"));
        assert!(toasts[0].body.contains("Artist A"));
        assert_eq!(tracker.snapshot().track.as_ref().unwrap().title, "Song B");
    }

    #[test]
    fn silence_to_music_does_not_toast() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(r#"{"status": "online", "activities": []}"#)
            .unwrap();
        let toasts = tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();

        assert!(toasts.is_empty());
        assert!(tracker.snapshot().track.is_some());
    }

    #[test]
    fn replaying_the_same_track_is_idempotent() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();
        let first = tracker
            .handle_frame(&listening_frame("Song B", "Artist B"))
            .unwrap();
        let replay = tracker
            .handle_frame(&listening_frame("Song B", "Artist B"))
            .unwrap();

        assert_eq!(first.len(), 1);
        assert!(replay.is_empty());
    }

    #[test]
    fn game_change_fires_even_from_no_game() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(r#"{"status": "online", "activities": []}"#)
            .unwrap();
        let toasts = tracker.handle_frame(&playing_frame("Factorio")).unwrap();

        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, NotificationKind::GameChange);
        assert_eq!(toasts[0].headline, "Started Playing");
        assert_eq!(toasts[0].body, "Factorio");
    }

    #[test]
    fn same_game_does_not_refire() {
        let mut tracker = PresenceTracker::new();
        tracker.handle_frame(&playing_frame("Factorio")).unwrap();
        let toasts = tracker.handle_frame(&playing_frame("Factorio")).unwrap();
        assert!(toasts.is_empty());
    }

    #[test]
    fn reconnect_rearms_suppression() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();

        tracker.mark_connected();
        let toasts = tracker
            .handle_frame(&listening_frame("Song B", "Artist B"))
            .unwrap();

        assert!(toasts.is_empty());
        assert_eq!(tracker.snapshot().track.as_ref().unwrap().title, "Song B");
    }

    #[test]
    fn track_and_game_change_in_one_frame_get_distinct_ids() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();
        let toasts = tracker
            .handle_frame(
                r#"{"status": "online", "activities": [
                    {"type": 2, "details": "Song B", "state": "Artist A"},
                    {"type": 0, "name": "Factorio"}
                ]}"#,
            )
            .unwrap();

        assert_eq!(toasts.len(), 2);
        assert_ne!(toasts[0].id, toasts[1].id);
    }

    #[test]
    fn malformed_frame_leaves_state_alone() {
        let mut tracker = PresenceTracker::new();
        tracker
            .handle_frame(&listening_frame("Song A", "Artist A"))
            .unwrap();

        assert!(tracker.handle_frame("not json").is_err());
        assert_eq!(tracker.snapshot().track.as_ref().unwrap().title, "Song A");

        // Suppression was already cleared; the next good frame diffs.
        let toasts = tracker
            .handle_frame(&listening_frame("Song B", "Artist A"))
            .unwrap();
        assert_eq!(toasts.len(), 1);
    }
}
