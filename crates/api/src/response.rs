//! One-shot response adapter handed to route handlers.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app::dto::Envelope;
use crate::app::errors::json_error;

/// Formats the envelope for exactly one response.
///
/// Both operations consume the adapter, so a handler cannot answer twice.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    route: Arc<str>,
}

impl ApiResponse {
    /// Adapter for the route identified by `route` (e.g. `GET /api/users`).
    pub fn new(route: impl Into<Arc<str>>) -> Self {
        Self { route: route.into() }
    }

    /// Route this adapter answers for.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// `200 { "code": 200, "data": data, "message": "success" }`.
    pub fn success<T: Serialize>(self, data: T) -> Response {
        (StatusCode::OK, Json(Envelope::success(data))).into_response()
    }

    /// `500 { "code": 500, "data": null, "message": message }`.
    pub fn error(self, message: impl Into<String>) -> Response {
        self.error_with_code(message, StatusCode::INTERNAL_SERVER_ERROR.as_u16())
    }

    /// Error envelope with an explicit code, also used as the HTTP status.
    ///
    /// Codes that are not valid HTTP statuses are answered with a 500 status
    /// but keep the requested `code` in the envelope.
    pub fn error_with_code(self, message: impl Into<String>, code: u16) -> Response {
        match StatusCode::from_u16(code) {
            Ok(status) => json_error(status, message),
            Err(_) => {
                tracing::warn!(route = %self.route, code, "error code is not an HTTP status");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::error(code, message)),
                )
                    .into_response()
            }
        }
    }
}
