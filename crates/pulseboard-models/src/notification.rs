use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "music")]
    TrackChange,
    #[serde(rename = "game")]
    GameChange,
    #[serde(rename = "donation")]
    Donation,
    #[serde(rename = "status")]
    StatusChange,
}

/// A short-lived user-facing toast. Immutable once created; removed
/// from the store after a fixed display duration, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique per process, strictly increasing in creation order.
    pub id: u64,
    pub kind: NotificationKind,
    pub headline: String,
    pub body: String,
    pub artwork_url: Option<String>,
}
