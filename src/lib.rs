// lib.rs
pub mod config;
pub mod devices;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod models;
pub mod server;
pub mod telemetry;

pub use devices::{Device, DeviceAction, LoggingDevice, MeteredDevice, SmartLight};
pub use error::{AppError, FacadeError};
pub use facade::IotFacade;
pub use models::{ActionRequest, DeviceAddress, StatusRecord};
