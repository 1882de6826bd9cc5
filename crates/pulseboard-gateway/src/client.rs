use futures_util::StreamExt;
use pulseboard_core::pipeline::GatewayEvent;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::GatewayConfig;

/// Connection manager: owns the one live socket to the presence feed.
///
/// Whenever the socket closes or errors, the next attempt is scheduled
/// after `reconnect_delay`. Reconnection is unconditional and
/// indefinite; there is no retry cap. Each successful connect emits
/// `GatewayEvent::Connected` ahead of any frames so the pipeline can
/// re-arm its first-frame suppression.
pub async fn run(
    config: GatewayConfig,
    events: mpsc::Sender<GatewayEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = connect_and_read(&config, &events) => {}
            _ = cancel.cancelled() => break,
        }
        if events.is_closed() {
            break;
        }
        tokio::select! {
            _ = tokio::time::sleep(config.reconnect_delay) => {}
            _ = cancel.cancelled() => break,
        }
    }
    tracing::debug!("gateway stopped");
}

/// One connection lifetime: connect, announce, forward frames until
/// the socket goes away.
async fn connect_and_read(config: &GatewayConfig, events: &mpsc::Sender<GatewayEvent>) {
    let stream = match tokio_tungstenite::connect_async(config.endpoint.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            tracing::warn!("gateway connect to {} failed: {}", config.endpoint, e);
            return;
        }
    };
    tracing::info!("gateway connected to {}", config.endpoint);

    if events.send(GatewayEvent::Connected).await.is_err() {
        return;
    }

    let (_write, mut read) = stream.split();
    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if events
                    .send(GatewayEvent::Frame(text.to_string()))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Ok(Message::Close(frame)) => {
                match frame {
                    Some(frame) => tracing::info!(
                        "gateway closed by server: code={} reason={}",
                        frame.code,
                        frame.reason
                    ),
                    None => tracing::info!("gateway closed by server"),
                }
                break;
            }
            // Pings are answered by tungstenite itself; binary frames
            // are not part of the feed.
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("gateway read error: {}", e);
                break;
            }
        }
    }
}
