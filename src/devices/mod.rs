// devices/mod.rs
mod logging;
mod metered;
mod smart_light;

pub use logging::LoggingDevice;
pub use metered::{DeviceStats, MeteredDevice};
pub use smart_light::{LightAction, PowerState, SmartLight};

use crate::{
    error::AppError,
    models::{ActionRequest, StatusRecord},
};
use async_trait::async_trait;
use std::fmt;

/// Typed action set of one device kind, decoded from the loosely-typed wire form.
pub trait DeviceAction: Sized + Send + Sync + fmt::Debug {
    fn decode(request: &ActionRequest) -> Result<Self, AppError>;
}

#[async_trait]
pub trait Device: Send + Sync {
    type Action: DeviceAction;

    fn device_id(&self) -> &str;

    /// Current observable state. Never fails.
    async fn get_status(&self) -> StatusRecord;

    /// Apply `action`; `false` when its parameters are out of range.
    async fn perform_action(&self, action: Self::Action) -> bool;

    /// Decode and apply a named action, saying why it was not applied.
    /// Decorators hook in here to see every request, decodable or not.
    async fn try_perform(&self, request: &ActionRequest) -> Result<(), AppError> {
        let action = Self::Action::decode(request)?;
        if self.perform_action(action).await {
            Ok(())
        } else {
            Err(AppError::Rejected(format!("invalid parameters for {request}")))
        }
    }

    /// Boolean form of [`Device::try_perform`]: unknown names, malformed
    /// parameters and rejected values all yield `false`.
    async fn perform(&self, request: &ActionRequest) -> bool {
        match self.try_perform(request).await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(device_id = self.device_id(), %request, error = %err, "action not applied");
                false
            }
        }
    }
}
