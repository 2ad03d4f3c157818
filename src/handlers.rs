// handlers.rs

use crate::{
    devices::Device,
    error::AppError,
    models::{Ack, ActionRequest, StatusRecord},
};
use axum::{Json, extract::State, http::Uri};
use std::sync::Arc;
use tracing::debug;

pub async fn get_status<D: Device + 'static>(State(device): State<Arc<D>>) -> Json<StatusRecord> {
    Json(device.get_status().await)
}

/// `POST /{action}` and `POST /{action}/{*params}`: path segments after the action are its
/// parameter values in call order. The raw path is split before decoding so
/// an encoded `/` stays inside its value.
pub async fn perform_action<D: Device + 'static>(
    State(device): State<Arc<D>>,
    uri: Uri,
) -> Result<Json<Ack>, AppError> {
    let request = ActionRequest::from_raw_path(uri.path())?;
    debug!(device_id = device.device_id(), %request, "Action request");

    device.try_perform(&request).await?;
    Ok(Json(Ack::success()))
}
