use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::{self, BoxFuture};

use crate::client::ChatTransport;
use crate::error::TransportResult;

pub const OFFLINE_TRANSPORT_ID: &str = "offline";

/// Replies used when the widget runs without a chat service.
pub const CANNED_REPLIES: [&str; 8] = [
    "Like a message in a bottle, your thoughts have reached me! 🌊",
    "The ocean whispers back: that's an interesting perspective!",
    "Your words ripple across the digital waves... Let me respond.",
    "The depths of conversation grow deeper with each message.",
    "From one shore to another, communication flows like the tide.",
    "In the vast ocean of knowledge, I've found your message.",
    "The currents of conversation carry us to new horizons.",
    "Like dolphins playing in the waves, let's explore this topic!",
];

/// Answers every message locally, cycling through [`CANNED_REPLIES`].
#[derive(Debug, Default)]
pub struct OfflineTransport {
    cursor: AtomicUsize,
}

impl OfflineTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_reply(&self) -> &'static str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        CANNED_REPLIES[index % CANNED_REPLIES.len()]
    }
}

impl ChatTransport for OfflineTransport {
    fn id(&self) -> &str {
        OFFLINE_TRANSPORT_ID
    }

    fn send<'a>(
        &'a self,
        text: &'a str,
        conversation_id: &'a str,
    ) -> BoxFuture<'a, TransportResult<String>> {
        let reply = self.next_reply();
        tracing::debug!(
            conversation_id,
            message_len = text.len(),
            "answering chat message offline"
        );
        Box::pin(future::ready(Ok(reply.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_rotate_and_wrap() {
        let transport = OfflineTransport::new();
        let replies = (0..CANNED_REPLIES.len() + 1)
            .map(|_| futures::executor::block_on(transport.send("hi", "c1")).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(replies[0], CANNED_REPLIES[0]);
        assert_eq!(replies[1], CANNED_REPLIES[1]);
        assert_eq!(replies[CANNED_REPLIES.len()], CANNED_REPLIES[0]);
    }
}
