use serde::{Deserialize, Serialize};

// -------------------------
// Response envelope
// -------------------------

/// Message carried by every success envelope.
pub const SUCCESS_MESSAGE: &str = "success";

/// Fixed JSON shape wrapping every handler-produced response:
/// `{ "code": <int>, "data": <payload|null>, "message": <string> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            data: Some(data),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

impl Envelope<()> {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
        }
    }
}

// -------------------------
// Built-in payloads
// -------------------------

/// Payload of the liveness endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessStatus {
    pub status: String,
    /// ISO-8601 / RFC 3339 timestamp.
    pub time: String,
    pub version: String,
    pub message: String,
}

/// Effective mount information reported by [`crate::app::AdvanceApi::server_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub prefix: String,
    pub base: String,
    pub test_url: String,
    pub docs_url: String,
    pub route_count: usize,
}
