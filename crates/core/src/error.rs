//! Registration error model.

use thiserror::Error;

/// Result type used by the registration engine.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registration-phase error.
///
/// These surface synchronously while routes are being mounted; request-time
/// failures are handled by the HTTP layer instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The verb is not one of GET, POST, PUT, DELETE.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The route table was already handed to the router; no more routes can be bound.
    #[error("registrar is sealed: route {method} {path} was registered after the router was built")]
    Sealed { method: String, path: String },

    /// The router's path matcher refused the path: a capture that conflicts
    /// with an earlier route, or an unnamed wildcard.
    #[error("route {method} {path} cannot be bound: {reason}")]
    RouteConflict {
        method: String,
        path: String,
        reason: String,
    },

    /// A module descriptor is malformed (e.g. an endpoint with an empty method).
    #[error("invalid module `{base}`: {reason}")]
    InvalidModule { base: String, reason: String },
}

impl RegistryError {
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod(method.into())
    }

    pub fn sealed(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Sealed {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn route_conflict(
        method: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RouteConflict {
            method: method.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_module(base: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModule {
            base: base.into(),
            reason: reason.into(),
        }
    }
}
