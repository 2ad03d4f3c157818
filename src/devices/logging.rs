// devices/logging.rs
use super::Device;
use crate::{
    error::AppError,
    models::{ActionRequest, StatusRecord},
};
use async_trait::async_trait;
use tracing::info;

/// Logs every call, then hands it to the wrapped device unchanged.
pub struct LoggingDevice<D> {
    inner: D,
}

impl<D: Device> LoggingDevice<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: Device> Device for LoggingDevice<D> {
    type Action = D::Action;

    fn device_id(&self) -> &str {
        self.inner.device_id()
    }

    async fn get_status(&self) -> StatusRecord {
        info!(device_id = self.device_id(), "Getting status");
        self.inner.get_status().await
    }

    async fn perform_action(&self, action: D::Action) -> bool {
        info!(device_id = self.device_id(), ?action, "Performing action");
        self.inner.perform_action(action).await
    }

    async fn try_perform(&self, request: &ActionRequest) -> Result<(), AppError> {
        info!(device_id = self.device_id(), %request, "Performing action");
        self.inner.try_perform(request).await
    }
}
