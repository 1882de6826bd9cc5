use std::fs;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub donations: DonationsConfig,
    #[serde(default)]
    pub toasts: ToastsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PresenceConfig {
    /// Presence feed WebSocket endpoint.
    #[serde(default = "default_presence_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

impl PresenceConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_presence_endpoint(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DonationsConfig {
    /// Donation feed HTTP endpoint.
    #[serde(default = "default_donations_url")]
    pub feed_url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl DonationsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for DonationsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_donations_url(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ToastsConfig {
    /// How long each toast stays active, in seconds.
    #[serde(default = "default_toast_ttl_secs")]
    pub ttl_secs: u64,
}

impl ToastsConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_toast_ttl_secs(),
        }
    }
}

fn default_presence_endpoint() -> String {
    "wss://supertiger.nerimity.com/trackdispresence/1369228144325824593".into()
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

fn default_donations_url() -> String {
    "https://api.asraye.com/donations".into()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_toast_ttl_secs() -> u64 {
    5
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!("config file not found at '{}', using defaults", path);
            Config::default()
        };

        // Environment variable overrides
        if let Ok(value) = std::env::var("PULSEBOARD_PRESENCE_ENDPOINT") {
            config.presence.endpoint = value;
        }
        if let Ok(value) = std::env::var("PULSEBOARD_DONATIONS_URL") {
            config.donations.feed_url = value;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_feed_cadence() {
        let config = Config::default();
        assert_eq!(config.presence.reconnect_delay(), Duration::from_secs(5));
        assert_eq!(config.donations.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.toasts.ttl(), Duration::from_secs(5));
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let config: Config = toml::from_str(
            r#"
            [presence]
            endpoint = "ws://localhost:9000/feed"
            "#,
        )
        .unwrap();
        assert_eq!(config.presence.endpoint, "ws://localhost:9000/feed");
        assert_eq!(config.presence.reconnect_delay_secs, 5);
        assert_eq!(config.donations.poll_interval_secs, 30);
    }
}
