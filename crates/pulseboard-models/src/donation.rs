use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Donation feed response. `top_supporter` and `top_supporter_value`
/// are display aggregates; they never drive notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationFeed {
    #[serde(default)]
    pub donations: Vec<Donation>,
    #[serde(rename = "top_supporter_name", default)]
    pub top_supporter: Option<String>,
    #[serde(default)]
    pub top_supporter_value: Option<f64>,
}

impl DonationFeed {
    /// Upstream order is not trusted; the watcher only ever looks at
    /// the first entry, so put the newest donation there.
    pub fn sort_newest_first(&mut self) {
        self.donations
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    /// Creation timestamp; doubles as the donation's identity.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub amounts: Option<DonationAmounts>,
}

impl Donation {
    pub fn donor(&self) -> &str {
        self.username.as_deref().unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationAmounts {
    pub total: MonetaryAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub value: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_sorts_newest_first() {
        let mut feed: DonationFeed = serde_json::from_str(
            r#"{"donations": [
                {"createdAt": "2024-01-01T00:00:00Z", "username": "old"},
                {"createdAt": "2024-01-03T00:00:00Z", "username": "new"},
                {"createdAt": "2024-01-02T00:00:00Z"}
            ]}"#,
        )
        .unwrap();
        feed.sort_newest_first();

        assert_eq!(feed.donations[0].donor(), "new");
        assert_eq!(feed.donations[1].donor(), "Anonymous");
        assert_eq!(feed.donations[2].donor(), "old");
    }

    #[test]
    fn full_feed_parses() {
        let feed: DonationFeed = serde_json::from_str(
            r#"{"donations": [{"createdAt": "2024-06-01T12:00:00Z",
                               "username": "Ren",
                               "amounts": {"total": {"value": 5.0, "currency": "USD"}}}],
                "top_supporter_name": "Ren", "top_supporter_value": 12.5}"#,
        )
        .unwrap();
        assert_eq!(feed.top_supporter.as_deref(), Some("Ren"));
        let amounts = feed.donations[0].amounts.as_ref().unwrap();
        assert_eq!(amounts.total.value, 5.0);
    }

    #[test]
    fn aggregate_fields_use_feed_names() {
        let feed: DonationFeed = serde_json::from_str(
            r#"{"donations": [], "top_supporter_name": "Ren", "top_supporter_value": 12.5}"#,
        )
        .unwrap();
        assert_eq!(feed.top_supporter.as_deref(), Some("Ren"));
        assert_eq!(feed.top_supporter_value, Some(12.5));
    }
}
