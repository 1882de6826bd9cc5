use std::time::Duration;

use chrono::{DateTime, Utc};
use pulseboard_models::donation::DonationFeed;
use pulseboard_models::notification::{Notification, NotificationKind};
use tokio_util::sync::CancellationToken;

use crate::ids;
use crate::toasts::NotificationStore;
use crate::CoreError;

/// Poll cadence for the donation feed. The first poll fires
/// immediately at startup.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Polls the donation feed and toasts when a new donation appears.
///
/// Only the single most recent donation is ever compared, so several
/// donations landing between two polls surface exactly one toast (for
/// the newest). Accepted lossy tradeoff.
pub struct DonationWatcher {
    http: reqwest::Client,
    feed_url: String,
    toasts: NotificationStore,
    /// Identity (creation timestamp) of the most recently seen
    /// donation. Dedup only, never displayed.
    watermark: Option<DateTime<Utc>>,
}

impl DonationWatcher {
    pub fn new(feed_url: impl Into<String>, toasts: NotificationStore) -> Result<Self, CoreError> {
        // No request timeout: a hung poll delays the next observable
        // update without blocking anything else.
        let http = reqwest::Client::builder()
            .user_agent(concat!("pulseboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            feed_url: feed_url.into(),
            toasts,
            watermark: None,
        })
    }

    pub fn watermark(&self) -> Option<DateTime<Utc>> {
        self.watermark
    }

    pub async fn fetch_feed(&self) -> Result<DonationFeed, CoreError> {
        let resp = self
            .http
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?;
        let mut feed: DonationFeed = resp.json().await?;
        feed.sort_newest_first();
        Ok(feed)
    }

    /// Advance the watermark over a freshly fetched feed (newest
    /// donation first) and return the toast to surface, if any.
    ///
    /// The first observation seeds the watermark silently so donations
    /// that already existed at startup are not announced.
    pub fn observe(&mut self, feed: &DonationFeed) -> Option<Notification> {
        let latest = feed.donations.first()?;
        match self.watermark {
            None => {
                self.watermark = Some(latest.created_at);
                None
            }
            Some(seen) if seen != latest.created_at => {
                self.watermark = Some(latest.created_at);
                Some(Notification {
                    id: ids::next_notification_id(),
                    kind: NotificationKind::Donation,
                    headline: "New Supporter".into(),
                    body: format!("{} just donated!", latest.donor()),
                    artwork_url: None,
                })
            }
            Some(_) => None,
        }
    }

    async fn tick(&mut self) {
        match self.fetch_feed().await {
            Ok(feed) => {
                if let Some(toast) = self.observe(&feed) {
                    self.toasts.push(toast);
                }
            }
            // Routine; the next tick retries unconditionally.
            Err(e) => tracing::debug!("donation poll failed: {}", e),
        }
    }

    /// Poll loop: once immediately, then every `interval` until
    /// cancelled.
    pub async fn run(mut self, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = cancel.cancelled() => break,
            }
        }
        tracing::debug!("donation watcher stopped");
    }
}
