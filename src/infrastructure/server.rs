use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

pub struct Server;

impl Server {
    pub async fn start(bind_address: &str, router: Router) -> Result<()> {
        let listener = TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("failed to bind {bind_address}"))?;
        tracing::info!(address = %listener.local_addr()?, "advisory server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("advisory server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for Ctrl+C");
    }
}
