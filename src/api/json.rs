//! JSON body extractor whose rejections use the API error shape

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json`, but a body that fails to parse or deserialize is answered
/// with a 400 `ErrorResponse` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);
