use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::clients::usgs::UsgsError;
use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Parse(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::Upstream(msg) => {
                // Raw provider error text is not safe to expose
                tracing::warn!("USGS request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Seismic data provider request failed".to_string(),
                )
            }
            ApiError::Storage(msg) => {
                tracing::error!("Search log write failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Request could not be stored on database".to_string(),
                )
            }
            ApiError::MalformedResponse(msg) => {
                tracing::error!("Unexpected USGS response shape: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Seismic data provider returned an unexpected response".to_string(),
                )
            }
        };

        let body = ErrorBody { message };
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    pub fn parse(msg: impl Into<String>) -> Self {
        ApiError::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        ApiError::Storage(msg.into())
    }
}

impl From<UsgsError> for ApiError {
    fn from(err: UsgsError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}
