use anyhow::Result;
use clap::Parser;
use pulseboard_core::donations::DonationWatcher;
use pulseboard_core::pipeline::run_presence_pipeline;
use pulseboard_core::status::StatusStore;
use pulseboard_core::toasts::NotificationStore;
use pulseboard_gateway::GatewayConfig;
use pulseboard_models::notification::Notification;
use pulseboard_models::presence::PresenceSnapshot;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pulseboard=info")),
        )
        .init();

    let args = cli::Args::parse();
    let config = config::Config::load(&args.config)?;

    let status = StatusStore::new();
    let toasts = NotificationStore::new(config.toasts.ttl());
    let cancel = CancellationToken::new();
    let (events_tx, events_rx) = mpsc::channel(64);

    let mut gateway_config = GatewayConfig::new(config.presence.endpoint.clone());
    gateway_config.reconnect_delay = config.presence.reconnect_delay();

    let gateway = tokio::spawn(pulseboard_gateway::run(
        gateway_config,
        events_tx,
        cancel.clone(),
    ));
    let pipeline = tokio::spawn(run_presence_pipeline(
        events_rx,
        status.clone(),
        toasts.clone(),
        cancel.clone(),
    ));
    let watcher = DonationWatcher::new(config.donations.feed_url.clone(), toasts.clone())?;
    let poller = tokio::spawn(watcher.run(config.donations.poll_interval(), cancel.clone()));

    // Stand-in for the display layer: log what it would render.
    tokio::spawn(log_activity(status.subscribe(), toasts.subscribe()));

    tracing::info!(
        "pulseboard running (presence: {}, donations: {})",
        config.presence.endpoint,
        config.donations.feed_url
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    cancel.cancel();
    let _ = tokio::join!(gateway, pipeline, poller);
    Ok(())
}

/// Logs status transitions and newly surfaced toasts.
async fn log_activity(
    mut status: watch::Receiver<PresenceSnapshot>,
    mut toasts: watch::Receiver<Vec<Notification>>,
) {
    let mut last_status = status.borrow().status;
    let mut last_toast_id = 0u64;
    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = status.borrow_and_update().clone();
                if snapshot.status != last_status {
                    tracing::info!("status: {:?} -> {:?}", last_status, snapshot.status);
                    last_status = snapshot.status;
                }
            }
            changed = toasts.changed() => {
                if changed.is_err() {
                    break;
                }
                let fresh: Vec<Notification> = toasts
                    .borrow_and_update()
                    .iter()
                    .filter(|n| n.id > last_toast_id)
                    .cloned()
                    .collect();
                for toast in fresh {
                    last_toast_id = toast.id;
                    tracing::info!("[{}] {}", toast.headline, toast.body);
                }
            }
        }
    }
}
