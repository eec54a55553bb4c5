//! Signal-driven graceful shutdown.
//!
//! The server is started with actix's own signal handling disabled so
//! liveness can flip to unhealthy before connections drain.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{info, warn};

use crate::inbound::http::health::HealthState;

async fn terminate() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    }
    #[cfg(not(unix))]
    std::future::pending::<()>().await;
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to install SIGINT handler");
        std::future::pending::<()>().await;
    }
}

/// Wait for SIGINT or SIGTERM, mark the process unhealthy and stop the
/// server gracefully.
pub async fn stop_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    tokio::select! {
        () = interrupt() => info!("received SIGINT, shutting down"),
        () = terminate() => info!("received SIGTERM, shutting down"),
    }
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
