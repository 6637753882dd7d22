use crate::message::{ChatMessage, Speaker};

/// Append-only transcript.
///
/// Order of `append` calls is the chronological order of the conversation.
/// Entries are never removed, reordered or edited, so the number of appends
/// doubles as a revision counter for change detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that opens with the greeting message.
    pub fn with_welcome(text: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.append(ChatMessage::welcome(text));
        store
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn user_turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.speaker() == Speaker::User)
            .count()
    }

    /// Monotonic change counter; increases by one per append.
    pub fn revision(&self) -> u64 {
        self.messages.len() as u64
    }
}
