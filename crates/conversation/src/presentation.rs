use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::conversation::Conversation;
use crate::message::{ChatMessage, MessageId, Speaker};
use crate::store::MessageStore;

/// Label shown next to the animated dots while a reply is pending.
pub const TYPING_LABEL: &str = "Sailing through thoughts...";

/// Horizontal placement of a bubble. User messages hug the trailing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAlignment {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub id: MessageId,
    pub speaker: Speaker,
    pub text: String,
    pub alignment: RowAlignment,
    pub time_label: String,
}

impl MessageRow {
    fn from_message<Tz>(message: &ChatMessage, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let alignment = match message.speaker() {
            Speaker::User => RowAlignment::End,
            Speaker::Bot => RowAlignment::Start,
        };

        Self {
            id: message.id().clone(),
            speaker: message.speaker(),
            text: message.text().to_string(),
            alignment,
            time_label: format_time(message.timestamp(), tz),
        }
    }
}

/// Element the list should bring into view after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Message(MessageId),
    TypingIndicator,
}

/// Renderable snapshot of a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub rows: Vec<MessageRow>,
    pub typing: bool,
    pub revision: u64,
}

impl TranscriptView {
    /// Builds the view in the local timezone.
    pub fn build(store: &MessageStore, typing: bool) -> Self {
        Self::build_in(store, typing, &Local)
    }

    pub fn build_in<Tz>(store: &MessageStore, typing: bool, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            rows: store
                .messages()
                .iter()
                .map(|message| MessageRow::from_message(message, tz))
                .collect(),
            typing,
            revision: store.revision(),
        }
    }

    pub fn from_conversation(conversation: &Conversation) -> Self {
        Self::build(conversation.store(), conversation.is_typing())
    }

    /// Number of rendered elements, including the typing indicator.
    pub fn element_count(&self) -> usize {
        self.rows.len() + usize::from(self.typing)
    }

    pub fn scroll_target(&self) -> Option<ScrollTarget> {
        if self.typing {
            return Some(ScrollTarget::TypingIndicator);
        }

        self.rows
            .last()
            .map(|row| ScrollTarget::Message(row.id.clone()))
    }

    /// Position of `target` among the rendered elements: rows in order, then
    /// the typing indicator.
    pub fn element_index(&self, target: &ScrollTarget) -> Option<usize> {
        match target {
            ScrollTarget::TypingIndicator => self.typing.then_some(self.rows.len()),
            ScrollTarget::Message(id) => self.rows.iter().position(|row| &row.id == id),
        }
    }

    /// Element index of [`TranscriptView::scroll_target`].
    pub fn scroll_index(&self) -> Option<usize> {
        self.scroll_target()
            .and_then(|target| self.element_index(&target))
    }
}

/// Decides when the list has to jump to its newest element.
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    seen_revision: Option<u64>,
    seen_typing: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `view` and returns true when it differs from the last observed
    /// transcript or newly shows the typing indicator.
    pub fn observe(&mut self, view: &TranscriptView) -> bool {
        let transcript_changed = self.seen_revision != Some(view.revision);
        let indicator_appeared = view.typing && !self.seen_typing;

        self.seen_revision = Some(view.revision);
        self.seen_typing = view.typing;

        transcript_changed || indicator_appeared
    }

    /// Forces the next observation to scroll.
    pub fn reset(&mut self) {
        self.seen_revision = None;
        self.seen_typing = false;
    }
}

pub fn format_time<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}
