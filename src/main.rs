use std::net::SocketAddr;

use axum::routing::get;
use registrar::{app, initialize_state, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::setup_logging();

    let state = initialize_state().await?;
    let port = state.config.port;

    let recorder = telemetry::setup_metrics_recorder()?;
    let router = app(state).route(
        "/metrics",
        get(move || std::future::ready(recorder.render())),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot install shutdown signal handler");
    }
    tracing::info!("shutting down");
}
