//! JSON envelope shared by every response of both services.

use crate::domain::model::TemperatureReport;
use crate::utils::error::{ErrorKind, LookupError, LookupResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TemperatureReport>,
}

/// Status code for a failed lookup.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidCep => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Upstream => StatusCode::BAD_REQUEST,
    }
}

/// An [`ApiResponse`] paired with its HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl JsonResponse {
    pub fn ok(report: TemperatureReport) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse {
                success: true,
                message: StatusCode::OK.canonical_reason().unwrap_or("OK").to_string(),
                data: Some(report),
            },
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse {
                success: false,
                message: message.into(),
                data: None,
            },
        }
    }

    pub fn from_error(err: &LookupError) -> Self {
        Self::failure(status_for(err.kind()), err.to_string())
    }
}

impl From<LookupResult<TemperatureReport>> for JsonResponse {
    fn from(outcome: LookupResult<TemperatureReport>) -> Self {
        match outcome {
            Ok(report) => JsonResponse::ok(report),
            Err(err) => JsonResponse::from_error(&err),
        }
    }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
