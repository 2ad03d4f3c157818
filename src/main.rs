// main.rs
use iot_facade::{
    LoggingDevice, MeteredDevice, SmartLight, config::Settings, server, telemetry,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&settings.log.filter)?)
        .init();

    if settings.metrics.enabled {
        let addr = telemetry::setup_metrics(settings.metrics.port)
            .map_err(|e| anyhow::anyhow!("Failed to setup metrics: {}", e))?;
        tracing::info!(%addr, "Metrics exporter started");
    }

    let address = settings.device.address();
    let light = MeteredDevice::new(SmartLight::new(settings.device.id.clone(), address.clone()));

    if settings.device.log_calls {
        server::serve(Arc::new(LoggingDevice::new(light)), &address).await
    } else {
        server::serve(Arc::new(light), &address).await
    }
}
