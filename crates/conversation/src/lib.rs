#![deny(unsafe_code)]

//! Conversation state for the Ocean Nova chat widget.
//!
//! Holds everything that does not need a window: the append-only transcript,
//! the per-session correlation id, the turn lifecycle and the renderable
//! snapshot the desktop shell draws from.
pub mod config;
mod conversation;
pub mod message;
pub mod notice;
pub mod presentation;
mod session;
mod store;
pub mod turn;

pub use config::{ConfigError, ConfigResult, ThemePreference, WidgetConfig};
pub use conversation::{Conversation, PendingTurn, TurnOutcome};
pub use message::{ChatMessage, MessageId, Speaker, WELCOME_MESSAGE_ID};
pub use notice::{DELIVERED_NOTICE, Notice, NoticeKind};
pub use presentation::{
    MessageRow, RowAlignment, ScrollTarget, ScrollTracker, TYPING_LABEL, TranscriptView,
};
pub use session::ConversationSession;
pub use store::MessageStore;
pub use turn::{TurnId, TurnRejection, TurnState, TurnTransition};
