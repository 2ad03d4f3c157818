// telemetry/mod.rs
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

/// Install the global recorder and expose it for scraping on `port`.
/// Must run inside a tokio runtime.
pub fn setup_metrics(port: u16) -> Result<SocketAddr, BuildError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    Ok(addr)
}
