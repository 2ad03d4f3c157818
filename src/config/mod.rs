// config/mod.rs
use crate::models::DeviceAddress;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub device: DeviceSettings,
    #[validate(nested)]
    pub metrics: MetricsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeviceSettings {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Wrap the device in the logging decorator.
    pub log_calls: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MetricsSettings {
    pub enabled: bool,
    #[validate(range(min = 1))]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `RUST_LOG` style directives.
    pub filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl Settings {
    /// Defaults, then `config/config.*` if present, then `APP_*` variables
    /// (`APP_DEVICE__PORT=9000`).
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_builder(
            defaults()?
                .add_source(File::with_name("config/config").required(false))
                .add_source(
                    Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

impl DeviceSettings {
    pub fn address(&self) -> DeviceAddress {
        DeviceAddress::new(self.host.clone(), self.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("device.id", "light_001")?
        .set_default("device.host", "127.0.0.1")?
        .set_default("device.port", 8002_i64)?
        .set_default("device.log_calls", true)?
        .set_default("metrics.enabled", false)?
        .set_default("metrics.port", 9100_i64)?
        .set_default("log.filter", "iot_facade=info,iot_device=info,tower_http=debug")
}
