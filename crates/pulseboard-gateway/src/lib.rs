mod client;

use std::time::Duration;

pub use client::run;

/// Delay between a socket closing and the next connect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// ws:// or wss:// endpoint of the presence feed.
    pub endpoint: String,
    pub reconnect_delay: Duration,
}

impl GatewayConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}
