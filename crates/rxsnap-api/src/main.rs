use std::sync::Arc;
use std::time::Duration;

use rxsnap_api::{keepalive, setup, state::AppState};
use rxsnap_core::Config;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Missing drive secrets are fatal here; there is no degraded mode.
    let config = Config::from_env()?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let drive = rxsnap_drive::create_drive(&config)?;
    let state = Arc::new(AppState::new(config.clone(), drive));
    let router = setup::build_router(state);

    let cancel = CancellationToken::new();
    let mut pinger = None;
    if let Some(url) = config.keepalive_url.clone() {
        tracing::info!(url = %url, interval_secs = config.keepalive_interval_secs, "Keepalive enabled");
        pinger = Some(keepalive::spawn_keepalive(
            url,
            Duration::from_secs(config.keepalive_interval_secs),
            cancel.clone(),
        ));
    }

    setup::start_server(&config, router).await?;

    cancel.cancel();
    if let Some(handle) = pinger {
        let _ = handle.await;
    }

    Ok(())
}
