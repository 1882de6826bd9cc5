use serde::{Deserialize, Serialize};

// Activity type discriminators used by the presence feed.
pub const ACTIVITY_TYPE_PLAYING: i32 = 0;
pub const ACTIVITY_TYPE_LISTENING: i32 = 2;

/// Raw presence frame as it arrives on the gateway socket.
///
/// Everything beyond `status` and `activities` is ignored; every nested
/// field is optional and defaulted so shape surprises never hard-fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceFrame {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl PresenceFrame {
    /// First activity of the given type. The feed is only supposed to
    /// carry one of each kind; if it ever carries more, first wins.
    pub fn activity_of(&self, activity_type: i32) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|a| a.activity_type == activity_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub assets: Option<ActivityAssets>,
    #[serde(default)]
    pub timestamps: Option<ActivityTimestamps>,
}

impl Activity {
    pub fn large_image_url(&self) -> Option<String> {
        self.assets.as_ref().and_then(|a| a.large_image_url.clone())
    }

    pub fn start_millis(&self) -> Option<i64> {
        self.timestamps.as_ref().and_then(|t| t.start)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityAssets {
    #[serde(rename = "largeImageUrl", default)]
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTimestamps {
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub start: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Online,
    Idle,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Offline,
}

impl ConnectionStatus {
    /// Missing or unrecognized status strings normalize to offline.
    pub fn from_wire(status: Option<&str>) -> Self {
        match status {
            Some("online") => Self::Online,
            Some("idle") => Self::Idle,
            Some("dnd") => Self::DoNotDisturb,
            _ => Self::Offline,
        }
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::Offline
    }
}

/// Normalized current presence state.
///
/// At most one active track and one active game at a time (feed
/// semantics); an absent activity is `None`, never a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub status: ConnectionStatus,
    pub track: Option<TrackActivity>,
    pub game: Option<GameActivity>,
}

impl PresenceSnapshot {
    pub fn from_frame(frame: &PresenceFrame) -> Self {
        Self {
            status: ConnectionStatus::from_wire(frame.status.as_deref()),
            track: frame
                .activity_of(ACTIVITY_TYPE_LISTENING)
                .map(TrackActivity::from_activity),
            game: frame
                .activity_of(ACTIVITY_TYPE_PLAYING)
                .map(GameActivity::from_activity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackActivity {
    pub title: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    /// Unix epoch milliseconds, for elapsed-time widgets.
    pub started_at: Option<i64>,
}

impl TrackActivity {
    fn from_activity(activity: &Activity) -> Self {
        Self {
            title: activity.details.clone().unwrap_or_default(),
            artist: activity.state.clone().unwrap_or_default(),
            artwork_url: activity.large_image_url(),
            started_at: activity.start_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameActivity {
    pub name: String,
    pub artwork_url: Option<String>,
    /// Unix epoch milliseconds, for elapsed-time widgets.
    pub started_at: Option<i64>,
}

impl GameActivity {
    fn from_activity(activity: &Activity) -> Self {
        Self {
            name: activity.name.clone().unwrap_or_default(),
            artwork_url: activity.large_image_url(),
            started_at: activity.start_millis(),
        }
    }
}
