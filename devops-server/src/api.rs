//! API request and response types

use serde::{Deserialize, Serialize};

pub use devops_core::{MessageRequest, MessageResponse};

/// Body returned by `POST /DevOps`'s sibling methods
pub const UNSUPPORTED_METHOD_BODY: &str = "ERROR";

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Service status
    pub status: String,
}

impl StatusResponse {
    /// The only status the service reports
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ok_serialization() {
        let json = serde_json::to_string(&StatusResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_unsupported_body_is_json_string() {
        let json = serde_json::to_string(UNSUPPORTED_METHOD_BODY).unwrap();
        assert_eq!(json, r#""ERROR""#);
    }
}
