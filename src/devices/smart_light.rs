// smart_light.rs
use super::{Device, DeviceAction};
use crate::{
    error::AppError,
    models::{ActionRequest, DeviceAddress, StatusRecord},
};
use async_trait::async_trait;
use std::str::FromStr;
use tokio::sync::RwLock;

pub const DEVICE_TYPE: &str = "smart_light";

const MAX_BRIGHTNESS: u8 = 100;
const DEFAULT_BRIGHTNESS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

impl FromStr for PowerState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(PowerState::On),
            "off" => Ok(PowerState::Off),
            other => Err(AppError::Validation(format!("invalid power state {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightAction {
    Power(PowerState),
    /// Raw level; the range is checked when the action is applied.
    Brightness(i64),
}

impl DeviceAction for LightAction {
    fn decode(request: &ActionRequest) -> Result<Self, AppError> {
        match request.action() {
            "power" => {
                let state = request.single_value("state")?;
                Ok(LightAction::Power(state.parse()?))
            }
            "brightness" => {
                let level = request.single_value("level")?;
                let level = level
                    .parse()
                    .map_err(|_| AppError::Validation(format!("invalid brightness level {level:?}")))?;
                Ok(LightAction::Brightness(level))
            }
            other => Err(AppError::UnsupportedAction(other.to_string())),
        }
    }
}

#[derive(Debug)]
struct LightState {
    is_on: bool,
    brightness: u8,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            is_on: false,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

pub struct SmartLight {
    device_id: String,
    address: DeviceAddress,
    state: RwLock<LightState>,
}

impl SmartLight {
    pub fn new(device_id: impl Into<String>, address: DeviceAddress) -> Self {
        Self {
            device_id: device_id.into(),
            address,
            state: RwLock::new(LightState::default()),
        }
    }
}

#[async_trait]
impl Device for SmartLight {
    type Action = LightAction;

    fn device_id(&self) -> &str {
        &self.device_id
    }

    async fn get_status(&self) -> StatusRecord {
        let state = self.state.read().await;
        StatusRecord::new()
            .with("device_id", self.device_id.as_str())
            .with("type", DEVICE_TYPE)
            .with("is_on", state.is_on)
            .with("brightness", state.brightness)
            .with("connection", self.address.to_string())
    }

    async fn perform_action(&self, action: LightAction) -> bool {
        match action {
            LightAction::Power(power) => {
                self.state.write().await.is_on = power == PowerState::On;
                true
            }
            LightAction::Brightness(level) => match u8::try_from(level) {
                Ok(level) if level <= MAX_BRIGHTNESS => {
                    self.state.write().await.brightness = level;
                    true
                }
                _ => false,
            },
        }
    }
}
