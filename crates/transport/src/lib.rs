//! Transport layer between the chat widget and the remote chat service.
use std::sync::Arc;

mod client;
mod error;
mod http;
mod offline;
pub mod wire;

pub use client::{ChatTransport, DEFAULT_CHAT_ENDPOINT, TransportConfig, TransportMode};
pub use error::{
    SERVER_FALLBACK_MESSAGE, TransportError, TransportResult, UNEXPECTED_ERROR_MESSAGE,
};
pub use http::{HTTP_TRANSPORT_ID, HttpChatTransport};
pub use offline::{CANNED_REPLIES, OFFLINE_TRANSPORT_ID, OfflineTransport};

pub fn create_transport(config: TransportConfig) -> TransportResult<Arc<dyn ChatTransport>> {
    match config.mode {
        TransportMode::Http => {
            let transport = HttpChatTransport::new(&config.endpoint)?;
            tracing::info!(endpoint = %transport.endpoint(), "using http chat transport");
            Ok(Arc::new(transport))
        }
        TransportMode::Offline => {
            tracing::info!("using offline chat transport");
            Ok(Arc::new(OfflineTransport::new()))
        }
    }
}
