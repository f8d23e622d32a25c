//! JSON error responses.
//!
//! Every error body has the shape `{"error": CODE, "message": text}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docengine_core::approval::{DecisionError, ErrorClass};
use docengine_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Builds an error response with the given status, code and message.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into()
        })),
    )
        .into_response()
}

/// Builds the response for an application error.
///
/// Database and internal errors are logged and answered with a generic message.
pub fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }
    error_response(status, err.error_code(), err.public_message())
}

/// Builds the response for a path segment that failed to parse, such as a malformed UUID.
pub fn path_rejection_response(rejection: &PathRejection) -> Response {
    app_error_response(&AppError::BadRequest(rejection.body_text()))
}

/// Builds the response for a request body that is not the expected JSON.
pub fn json_rejection_response(rejection: &JsonRejection) -> Response {
    app_error_response(&AppError::BadRequest(rejection.body_text()))
}

/// Maps an approval error class to its HTTP status.
#[must_use]
pub const fn class_status(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Forbidden => StatusCode::FORBIDDEN,
        ErrorClass::Conflict => StatusCode::CONFLICT,
    }
}

/// Builds the response for a failed approve/reject call.
pub fn decision_error_response(err: &DecisionError) -> Response {
    match err {
        DecisionError::Approval(violation) => {
            warn!(error = %violation, code = violation.error_code(), "Approval rule violated");
            error_response(
                class_status(violation.class()),
                violation.error_code(),
                violation.to_string(),
            )
        }
        DecisionError::Store(store) => app_error_response(&AppError::Database(store.to_string())),
    }
}
