//! # Response formatting
//!
//! One envelope for every JSON endpoint: `{"success": true, "data": ...}`
//! on success, `{"success": false, "error": ...}` on failure. Internal
//! failures are logged through `tracing` and reach the client only as a
//! generic message.

use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::error::AppError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// 200 with the standard success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { success: true, data })
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// 302 with a `Location` header. Axum's redirect helpers emit 303/307/308;
/// the front end expects a plain 302 for permalink navigation.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Newtype so `?` converts any `AppError` straight into an envelope
/// response inside a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            err @ AppError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            err @ AppError::NotFound(_, _) => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { success: false, error: message })).into_response()
    }
}

/// Handler result: any `AppError` degrades to its envelope, never a panic.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
