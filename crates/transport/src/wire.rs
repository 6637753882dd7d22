use serde::{Deserialize, Serialize};

/// Role tag carried by every outgoing chat request.
pub const USER_ROLE: &str = "user";

/// Body of `POST /chat/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub role: String,
    pub conversation_id: String,
}

impl ChatRequest {
    pub fn user(message: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            role: USER_ROLE.to_string(),
            conversation_id: conversation_id.into(),
        }
    }
}

/// Success payload. The service may send more fields; only `response` is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Error payload returned with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDetail {
    /// Extracts a non-blank `detail` from a raw error body, if the body is JSON at all.
    pub fn from_body(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorDetail>(body)
            .ok()
            .and_then(|payload| payload.detail)
            .map(|detail| detail.trim().to_string())
            .filter(|detail| !detail.is_empty())
    }
}
