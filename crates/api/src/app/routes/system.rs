use chrono::{SecondsFormat, Utc};

use crate::app::dto::LivenessStatus;
use crate::context::ApiRequest;
use crate::handler::HandlerResult;
use crate::response::ApiResponse;

/// Fixed message of the liveness payload.
pub const LIVENESS_MESSAGE: &str = "Advance API is working!";

/// Liveness payload stamped with the current time (RFC 3339, millisecond precision, UTC).
pub fn liveness_status(version: &str) -> LivenessStatus {
    LivenessStatus {
        status: "ok".to_string(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: version.to_string(),
        message: LIVENESS_MESSAGE.to_string(),
    }
}

pub async fn liveness(version: &str, _req: ApiRequest, res: ApiResponse) -> HandlerResult {
    Ok(res.success(liveness_status(version)))
}
