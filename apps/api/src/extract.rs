use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use dispatchdesk_core::AppError;

use crate::error::ApiError;

/// JSON body extractor whose rejections render as [`ApiError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
