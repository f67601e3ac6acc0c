use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// Renders a usecase error as the wire-level error envelope. Server-side
/// failures are reported without their internal detail.
pub fn usecase_error(status: StatusCode, err: impl std::fmt::Display) -> Response {
    let message = if status.is_server_error() {
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(ErrorResponse {
            code: status.as_u16(),
            message,
        }),
    )
        .into_response()
}
