// error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Device-side failures, turned into HTTP responses at the transport edge.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Action rejected: {0}")]
    Rejected(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnsupportedAction(_) => StatusCode::NOT_FOUND,
            AppError::MissingParameter(_) | AppError::Validation(_) | AppError::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
        };

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Client-side failures when the facade talks to a device.
///
/// The boolean/optional facade methods collapse all of these; the `try_`
/// variants hand them to the caller.
#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("device {0} is not registered")]
    UnknownDevice(String),
    #[error("invalid address for device {device_id}")]
    InvalidAddress {
        device_id: String,
        #[source]
        source: url::ParseError,
    },
    #[error("device {device_id} is unreachable")]
    Unreachable {
        device_id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("device {device_id} answered with {status}")]
    Rejected {
        device_id: String,
        status: reqwest::StatusCode,
    },
    #[error("device {device_id} sent an invalid status payload")]
    InvalidPayload {
        device_id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl FacadeError {
    pub fn is_unknown_device(&self) -> bool {
        matches!(self, FacadeError::UnknownDevice(_))
    }
}
