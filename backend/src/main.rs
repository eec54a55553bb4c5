//! Gateway entry-point: loads configuration, connects to MongoDB and serves
//! the CRUD routes until a shutdown signal arrives.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use vendor_gateway::config::{GatewayConfig, GatewaySettings, ProcessEnv, Profile};
use vendor_gateway::inbound::http::health::HealthState;
use vendor_gateway::outbound::persistence::{
    MongoConnection, MongoDocumentRepository, RetryPolicy, WATCH_INTERVAL, watch_connection,
};
use vendor_gateway::server::create_server;
use vendor_gateway::server::shutdown::stop_on_signal;
use vendor_gateway::telemetry::install_panic_hook;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    install_panic_hook();

    let profile = Profile::from_env(&ProcessEnv);
    let settings = GatewaySettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load gateway settings: {err}"))?;
    let config = GatewayConfig::resolve(profile, &settings)?;
    info!(
        profile = %config.profile,
        database = config.mongo.database(),
        "starting gateway"
    );

    let connection = MongoConnection::open(&config.mongo)
        .await
        .wrap_err("failed to configure MongoDB client")?;
    let health_state = web::Data::new(HealthState::new());

    let probe = connection.clone();
    let probe_health = health_state.clone();
    let watcher = actix_web::rt::spawn(async move {
        watch_connection(&probe, RetryPolicy::default(), WATCH_INTERVAL, |connected| {
            probe_health.set_database_connected(connected);
        })
        .await;
    });

    let bind_addr = config.server.bind_addr();
    let repository = Arc::new(MongoDocumentRepository::new(connection.clone()));
    let server = create_server(health_state.clone(), config.server, repository)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "gateway listening");

    actix_web::rt::spawn(stop_on_signal(server.handle(), health_state.clone()));
    server.await.wrap_err("HTTP server failed")?;

    health_state.mark_unhealthy();
    watcher.abort();
    connection.close().await;
    info!("mongoDB connection is disconnected through app termination");
    Ok(())
}
