// facade/registry.rs
use crate::models::DeviceAddress;
use tokio::sync::RwLock;

/// Device identity to address, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<Vec<(String, DeviceAddress)>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. A re-registered device keeps its position.
    pub async fn insert(&self, device_id: String, address: DeviceAddress) {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|(id, _)| *id == device_id) {
            Some((_, existing)) => *existing = address,
            None => entries.push((device_id, address)),
        }
    }

    pub async fn get(&self, device_id: &str) -> Option<DeviceAddress> {
        self.entries
            .read()
            .await
            .iter()
            .find(|(id, _)| id == device_id)
            .map(|(_, address)| address.clone())
    }

    pub async fn device_ids(&self) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}
