// server.rs
use crate::{
    devices::Device,
    handlers::{get_status, perform_action},
    models::DeviceAddress,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// HTTP surface of a single device: `GET /status` plus
/// `POST /<action>/<value>/...`.
pub fn router<D: Device + 'static>(device: Arc<D>) -> Router {
    Router::new()
        .route("/status", get(get_status::<D>))
        .route("/{action}", post(perform_action::<D>))
        .route("/{action}/{*params}", post(perform_action::<D>))
        .layer(TraceLayer::new_for_http())
        .with_state(device)
}

pub async fn serve<D: Device + 'static>(device: Arc<D>, address: &DeviceAddress) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((address.host.as_str(), address.port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", address, e))?;

    serve_on(device, listener).await
}

/// Serve on an already bound listener (useful with port 0).
pub async fn serve_on<D: Device + 'static>(
    device: Arc<D>,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let local = listener.local_addr()?;
    tracing::info!(device_id = device.device_id(), %local, "Device server started");

    axum::serve(listener, router(device))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
