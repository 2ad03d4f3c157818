// devices/metered.rs
use super::Device;
use crate::{
    error::AppError,
    models::{ActionRequest, StatusRecord},
};
use async_trait::async_trait;
use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call counters of one [`MeteredDevice`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    pub status_reads: u64,
    pub actions_accepted: u64,
    pub actions_rejected: u64,
}

/// Counts status reads and action outcomes, locally and through `metrics`.
pub struct MeteredDevice<D> {
    inner: D,
    status_reads: AtomicU64,
    actions_accepted: AtomicU64,
    actions_rejected: AtomicU64,
}

impl<D: Device> MeteredDevice<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            status_reads: AtomicU64::new(0),
            actions_accepted: AtomicU64::new(0),
            actions_rejected: AtomicU64::new(0),
        }
    }

    fn record_action(&self, accepted: bool) {
        let outcome = if accepted {
            self.actions_accepted.fetch_add(1, Ordering::Relaxed);
            "accepted"
        } else {
            self.actions_rejected.fetch_add(1, Ordering::Relaxed);
            "rejected"
        };
        counter!(
            "device_actions_total",
            "device_id" => self.device_id().to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }

    pub fn stats(&self) -> DeviceStats {
        DeviceStats {
            status_reads: self.status_reads.load(Ordering::Relaxed),
            actions_accepted: self.actions_accepted.load(Ordering::Relaxed),
            actions_rejected: self.actions_rejected.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl<D: Device> Device for MeteredDevice<D> {
    type Action = D::Action;

    fn device_id(&self) -> &str {
        self.inner.device_id()
    }

    async fn get_status(&self) -> StatusRecord {
        self.status_reads.fetch_add(1, Ordering::Relaxed);
        counter!("device_status_reads_total", "device_id" => self.device_id().to_string())
            .increment(1);
        self.inner.get_status().await
    }

    async fn perform_action(&self, action: D::Action) -> bool {
        let accepted = self.inner.perform_action(action).await;
        self.record_action(accepted);
        accepted
    }

    async fn try_perform(&self, request: &ActionRequest) -> Result<(), AppError> {
        let result = self.inner.try_perform(request).await;
        self.record_action(result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{LightAction, LoggingDevice, PowerState, SmartLight};
    use crate::models::{ActionRequest, DeviceAddress};

    fn light() -> SmartLight {
        SmartLight::new("L1", DeviceAddress::new("127.0.0.1", 8002))
    }

    #[tokio::test]
    async fn should_count_reads_and_outcomes() {
        let device = MeteredDevice::new(light());

        device.get_status().await;
        device.get_status().await;
        assert!(device.perform_action(LightAction::Power(PowerState::On)).await);
        assert!(device.perform_action(LightAction::Brightness(20)).await);
        assert!(!device.perform_action(LightAction::Brightness(120)).await);

        assert_eq!(
            device.stats(),
            DeviceStats {
                status_reads: 2,
                actions_accepted: 2,
                actions_rejected: 1,
            }
        );
    }

    #[tokio::test]
    async fn should_count_undecodable_requests_as_rejected() {
        let device = MeteredDevice::new(light());
        assert!(!device.perform(&ActionRequest::new("power").param("state", "maybe")).await);
        assert!(!device.perform(&ActionRequest::new("strobe")).await);
        assert!(device.perform(&ActionRequest::new("power").param("state", "on")).await);

        assert_eq!(
            device.stats(),
            DeviceStats {
                status_reads: 0,
                actions_accepted: 1,
                actions_rejected: 2,
            }
        );
    }

    #[tokio::test]
    async fn should_stay_transparent_under_logging() {
        let bare = light();
        let stacked = LoggingDevice::new(MeteredDevice::new(light()));
        let request = ActionRequest::new("brightness").param("level", 99);

        assert_eq!(stacked.perform(&request).await, bare.perform(&request).await);
        assert_eq!(stacked.get_status().await, bare.get_status().await);
        assert_eq!(stacked.inner().stats().actions_accepted, 1);
        assert_eq!(stacked.inner().stats().status_reads, 1);
    }
}
