use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use advance_api_core::RegistryError;

use crate::app::dto::Envelope;

/// Message returned to clients whenever a handler fails internally.
///
/// The underlying error is logged, never echoed back.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Error envelope response: HTTP status and `code` field agree.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(Envelope::error(status.as_u16(), message)),
    )
        .into_response()
}

/// Error returned by a route handler.
///
/// Any `std::error::Error` converts into [`HandlerError::Internal`], so handlers
/// can use `?` freely. Internal errors become a generic 500 envelope.
#[derive(Debug)]
pub enum HandlerError {
    /// The request itself was unusable (bad JSON, bad query string, body too large).
    Rejected { status: StatusCode, message: String },
    /// Anything else; logged and answered with [`INTERNAL_ERROR_MESSAGE`].
    Internal(anyhow::Error),
}

impl HandlerError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// Status the client will see.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl core::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rejected { status, message } => write!(f, "request rejected ({status}): {message}"),
            Self::Internal(err) => write!(f, "{err:#}"),
        }
    }
}

impl<E> From<E> for HandlerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected { status, message } => {
                tracing::warn!(%status, %message, "request rejected");
                json_error(status, message)
            }
            Self::Internal(err) => {
                tracing::error!(error = format!("{err:#}"), "handler failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

/// Startup failure. Nothing is served when bootstrap returns one of these.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Registration itself failed (sealed registrar, strict method check, bad module).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The caller's setup function returned an error.
    #[error("setup function failed: {0:#}")]
    Setup(anyhow::Error),

    /// An imperative module's build callback returned an error.
    #[error("module `{base}` failed to build: {error:#}")]
    ModuleBuild { base: String, error: anyhow::Error },
}
