//! Application error type and its HTTP rendering.
//!
//! Every handler returns `Result<_, AppError>`. The variant picks the status
//! code and the body is always an [`ErrorBody`]. Extractor failures (JSON
//! body, query string, path) are routed through the same type by the configs
//! at the bottom of this file.

use crate::store::StoreError;
use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use chrono::Utc;
use log::error;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        error!("Store operation failed: {e}");
        AppError::Internal(e.to_string())
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        error!("Blocking task failed: {e}");
        AppError::Internal(e.to_string())
    }
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Store and runtime details stay in the log.
        let message = match self {
            AppError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        })
    }
}

/// JSON body extraction with the size limit and errors in the `ErrorBody` shape.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| json_error(err).into())
}

fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            AppError::PayloadTooLarge(err.to_string())
        }
        other => AppError::InvalidInput(other.to_string()),
    }
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}
