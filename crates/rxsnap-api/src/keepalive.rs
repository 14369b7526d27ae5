//! Keepalive pinger.
//!
//! Free hosting tiers idle the process out after a quiet period; a periodic
//! self-GET keeps it warm. The task shares nothing with request handling
//! beyond the target URL and is cancellable for shutdown.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub fn spawn_keepalive(
    url: String,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so we don't ping a
        // server that is still binding its listener.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Keepalive task stopped");
                    return;
                }
                _ = ticker.tick() => {
                    match client.get(&url).send().await {
                        Ok(response) => {
                            tracing::debug!(url = %url, status = %response.status(), "Keepalive ping");
                        }
                        Err(e) => {
                            tracing::warn!(url = %url, error = %e, "Keepalive ping failed");
                        }
                    }
                }
            }
        }
    })
}
