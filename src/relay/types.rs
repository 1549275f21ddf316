//! Relay request/response types

use serde::{Deserialize, Serialize};

/// Submission payload posted to the relay endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRequest {
    /// The captured text
    pub input: String,
}

/// Acknowledgment returned by the relay endpoint
///
/// `status` is `"ok"` for every well-formed body, independent of downstream
/// delivery. `error` is only present for malformed bodies.
#[derive(Debug, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(message.into()),
        }
    }
}

/// Status probe response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server readiness: always `ready` once the listener is up
    pub status: String,
    /// Crate version
    pub version: String,
    /// Configured external sink URL
    pub forward_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_ack_omits_error_field() {
        let encoded = serde_json::to_string(&AckResponse::ok()).expect("serialize");
        assert_eq!(encoded, r#"{"status":"ok"}"#);
    }

    #[test]
    fn error_ack_carries_message() {
        let ack = AckResponse::error("expected value at line 1 column 1");
        let encoded = serde_json::to_string(&ack).expect("serialize");
        assert!(encoded.contains(r#""status":"error""#));
        assert!(encoded.contains("expected value"));
    }
}
