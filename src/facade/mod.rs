// facade/mod.rs
mod registry;

pub use registry::Registry;

use crate::{
    error::FacadeError,
    models::{ActionRequest, DeviceAddress, StatusRecord},
};
use futures_util::future::join_all;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bound on every outbound device call. No retries.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Single client-side entry point to every registered device.
///
/// Devices are addressed by identity only; the facade owns the
/// identity-to-address mapping and turns each call into an HTTP request
/// against the device's own server.
pub struct IotFacade {
    http: reqwest::Client,
    registry: Registry,
}

impl IotFacade {
    pub fn new() -> Result<Self, FacadeError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FacadeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FacadeError::Client)?;
        Ok(Self::with_client(http))
    }

    /// The client's own timeout settings apply as-is.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            registry: Registry::new(),
        }
    }

    /// Register or re-register a device. Always succeeds.
    pub async fn register(&self, device_id: impl Into<String>, address: DeviceAddress) -> String {
        let device_id = device_id.into();
        info!(%device_id, %address, "Device registered");
        let confirmation = format!("Device {device_id} registered successfully");
        self.registry.insert(device_id, address).await;
        confirmation
    }

    pub async fn address_of(&self, device_id: &str) -> Option<DeviceAddress> {
        self.registry.get(device_id).await
    }

    pub async fn device_ids(&self) -> Vec<String> {
        self.registry.device_ids().await
    }

    /// Status of one device; `None` when it is unknown, unreachable, or
    /// answered with an error.
    pub async fn get_status(&self, device_id: &str) -> Option<StatusRecord> {
        self.try_get_status(device_id)
            .await
            .inspect_err(report)
            .ok()
    }

    pub async fn try_get_status(&self, device_id: &str) -> Result<StatusRecord, FacadeError> {
        let address = self.lookup(device_id).await?;
        let url = address
            .url(["status"])
            .map_err(|source| FacadeError::InvalidAddress {
                device_id: device_id.to_string(),
                source,
            })?;

        debug!(%device_id, %url, "GET status");
        let response = self.http.get(url).send().await.map_err(|source| FacadeError::Unreachable {
            device_id: device_id.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FacadeError::Rejected {
                device_id: device_id.to_string(),
                status,
            });
        }

        response
            .json::<StatusRecord>()
            .await
            .map_err(|source| FacadeError::InvalidPayload {
                device_id: device_id.to_string(),
                source,
            })
    }

    /// `true` iff the device accepted the action.
    pub async fn perform_action(&self, device_id: &str, request: &ActionRequest) -> bool {
        self.try_perform_action(device_id, request)
            .await
            .inspect_err(report)
            .is_ok()
    }

    /// Parameter values go on the path positionally, names are dropped.
    pub async fn try_perform_action(
        &self,
        device_id: &str,
        request: &ActionRequest,
    ) -> Result<(), FacadeError> {
        let address = self.lookup(device_id).await?;
        let segments = std::iter::once(request.action()).chain(request.values());
        let url = address.url(segments).map_err(|source| FacadeError::InvalidAddress {
            device_id: device_id.to_string(),
            source,
        })?;

        debug!(%device_id, %request, %url, "POST action");
        let response = self.http.post(url).send().await.map_err(|source| FacadeError::Unreachable {
            device_id: device_id.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FacadeError::Rejected {
                device_id: device_id.to_string(),
                status,
            })
        }
    }

    /// Status of every reachable device, in registration order. Devices
    /// that fail are left out.
    pub async fn get_all_status(&self) -> Vec<StatusRecord> {
        let ids = self.registry.device_ids().await;
        join_all(ids.iter().map(|id| self.get_status(id)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn lookup(&self, device_id: &str) -> Result<DeviceAddress, FacadeError> {
        self.registry
            .get(device_id)
            .await
            .ok_or_else(|| FacadeError::UnknownDevice(device_id.to_string()))
    }
}

fn report(err: &FacadeError) {
    if err.is_unknown_device() {
        debug!(error = %err, "Device lookup failed");
    } else {
        warn!(error = %err, "Device call failed");
    }
}
