//! Unified error handling
//!
//! `EstimateError` is what the pricing core returns; `ApiError` turns it (and
//! everything else the HTTP layer can hit) into consistent JSON responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced by the pricing core. No variant is retriable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Invalid value for `{field}`: {value}")]
    InvalidInput { field: String, value: String },

    #[error("Pricing catalog has no entry for {0}")]
    CatalogLookupMiss(String),
}

impl EstimateError {
    pub fn invalid(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
        }
    }

    pub fn catalog_miss(what: impl Into<String>) -> Self {
        Self::CatalogLookupMiss(what.into())
    }

    /// Prefix the offending field with its position in a multi-room request.
    pub fn for_room(self, index: usize) -> Self {
        match self {
            Self::InvalidInput { field, value } => Self::InvalidInput {
                field: format!("rooms[{index}].{field}"),
                value,
            },
            other => other,
        }
    }
}

pub type EstimateResult<T> = Result<T, EstimateError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input for `{field}`: {value}")]
    InvalidInput { field: String, value: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            Self::InvalidInput { field, value } => {
                format!("Invalid value for `{field}`: {value}")
            }
            // Don't leak catalog or internal details
            Self::Catalog(_) => "Pricing is not configured for this request".to_string(),
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            Self::InvalidInput { field, .. } => Some(field.clone()),
            _ => None,
        }
    }
}

impl From<EstimateError> for ApiError {
    fn from(err: EstimateError) -> Self {
        match err {
            EstimateError::InvalidInput { field, value } => Self::InvalidInput { field, value },
            EstimateError::CatalogLookupMiss(what) => Self::Catalog(what),
        }
    }
}

const JSON_DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Body text is "<prefix><path>: <serde message>"; the path names the field
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let detail = text.strip_prefix(JSON_DATA_ERROR_PREFIX).unwrap_or(&text);
                match detail.split_once(": ") {
                    Some((path, message)) if !path.contains(' ') => Self::InvalidInput {
                        field: path.to_string(),
                        value: message.to_string(),
                    },
                    _ => Self::InvalidInput {
                        field: "body".to_string(),
                        value: detail.to_string(),
                    },
                }
            }
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            Self::Catalog(what) => {
                tracing::error!(missing = %what, "Pricing catalog lookup miss");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            field: self.field(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
