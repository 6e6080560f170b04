use anyhow::Result;
use dni_lookup::{api::HttpServer, config::Config, query::LookupCoordinator};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Run the HTTP API until Ctrl-C
pub async fn serve(mut config: Config, listen: Option<String>) -> Result<()> {
    if let Some(addr) = listen {
        config.http.listen_addr = addr;
        config.validate()?;
    }

    let coordinator = Arc::new(LookupCoordinator::from_config(&config)?);
    info!(
        "Serving lookups across {} sources: {}",
        coordinator.source_names().len(),
        coordinator.source_names().join(", ")
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(forward_shutdown(tokio::signal::ctrl_c(), shutdown_tx));

    HttpServer::new(config.http.clone(), coordinator)
        .run(shutdown_rx)
        .await
}

/// Broadcast shutdown once `signal` fires.
///
/// If the signal cannot be installed the sender is held forever, so the
/// server keeps running instead of seeing a closed channel.
async fn forward_shutdown<F>(signal: F, shutdown_tx: broadcast::Sender<()>)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    let _ = shutdown_tx.send(());
}
