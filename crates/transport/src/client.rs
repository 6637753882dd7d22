use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::TransportResult;

/// Endpoint served by the companion chat service during local development.
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://localhost:8000/chat/";

/// Which transport backs the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Http,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub mode: TransportMode,
    pub endpoint: String,
}

impl TransportConfig {
    pub fn new(mode: TransportMode, endpoint: impl Into<String>) -> Self {
        Self {
            mode,
            endpoint: endpoint.into().trim().to_string(),
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self::new(TransportMode::Http, endpoint)
    }

    pub fn offline() -> Self {
        Self::new(TransportMode::Offline, DEFAULT_CHAT_ENDPOINT)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::http(DEFAULT_CHAT_ENDPOINT)
    }
}

/// One request/response exchange with the chat service.
///
/// Implementations issue exactly one call per `send` and never retry. Callers are
/// responsible for keeping at most one call in flight.
pub trait ChatTransport: Send + Sync {
    fn id(&self) -> &str;

    fn send<'a>(
        &'a self,
        text: &'a str,
        conversation_id: &'a str,
    ) -> BoxFuture<'a, TransportResult<String>>;
}
