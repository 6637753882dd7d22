use nova_transport::{ChatTransport, TransportResult};

use crate::message::{ChatMessage, MessageId};
use crate::notice::Notice;
use crate::session::ConversationSession;
use crate::store::MessageStore;
use crate::turn::{TurnId, TurnRejection, TurnState, TurnTransition};

/// A submitted message waiting for the service to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub turn: TurnId,
    pub text: String,
    pub conversation_id: String,
    pub user_message_id: MessageId,
}

/// Result of settling one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn: TurnId,
    /// Id of the appended bot message, `None` when the request failed.
    pub reply_message_id: Option<MessageId>,
    pub notice: Notice,
}

impl TurnOutcome {
    pub fn is_fulfilled(&self) -> bool {
        self.reply_message_id.is_some()
    }
}

/// Owned per-session chat state: transcript, correlation id and turn lifecycle.
///
/// Every mutation goes through [`Conversation::begin_turn`] and
/// [`Conversation::complete_turn`]. The user message is appended optimistically
/// and is kept even when the request fails.
#[derive(Debug, Clone)]
pub struct Conversation {
    session: ConversationSession,
    store: MessageStore,
    state: TurnState,
    next_turn_id: u64,
}

impl Conversation {
    pub fn new(welcome_message: impl Into<String>) -> Self {
        Self::with_session(ConversationSession::generate(), welcome_message)
    }

    pub fn with_session(session: ConversationSession, welcome_message: impl Into<String>) -> Self {
        tracing::debug!(conversation_id = %session, "conversation session started");
        Self {
            session,
            store: MessageStore::with_welcome(welcome_message),
            state: TurnState::Idle,
            next_turn_id: 1,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.store.messages()
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// True exactly while one request is outstanding.
    pub fn is_typing(&self) -> bool {
        self.state.is_sending()
    }

    pub fn input_enabled(&self) -> bool {
        !self.state.is_sending()
    }

    /// Starts a turn: appends the user message and moves to `Sending`.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, TurnRejection> {
        if text.trim().is_empty() {
            return Err(TurnRejection::EmptyMessage);
        }

        let turn = TurnId::new(self.next_turn_id);
        self.state = self.state.apply(TurnTransition::Submit(turn))?;
        self.next_turn_id = self.next_turn_id.saturating_add(1);

        let message = ChatMessage::user(text);
        let user_message_id = message.id().clone();
        self.store.append(message);

        tracing::info!(
            conversation_id = %self.session,
            turn = turn.0,
            message_id = %user_message_id,
            "chat turn started"
        );

        Ok(PendingTurn {
            turn,
            text: text.to_string(),
            conversation_id: self.session.id().to_string(),
            user_message_id,
        })
    }

    /// Settles the outstanding turn with the transport result and returns to `Idle`.
    pub fn complete_turn(
        &mut self,
        turn: TurnId,
        result: TransportResult<String>,
    ) -> Result<TurnOutcome, TurnRejection> {
        let (transition, reply, notice) = match result {
            Ok(reply) => (TurnTransition::Fulfil(turn), Some(reply), Notice::delivered()),
            Err(error) => {
                let message = error.user_message();
                tracing::warn!(
                    conversation_id = %self.session,
                    turn = turn.0,
                    stage = error.stage(),
                    error = %error,
                    "chat turn failed"
                );
                (
                    TurnTransition::Fail {
                        turn,
                        message: message.clone(),
                    },
                    None,
                    Notice::failure(message),
                )
            }
        };

        let finished = self.state.apply(transition)?;
        tracing::debug!(turn = turn.0, state = ?finished, "chat turn finished");

        let reply_message_id = reply.map(|text| {
            let message = ChatMessage::bot(text);
            let id = message.id().clone();
            self.store.append(message);
            id
        });

        self.state = finished.apply(TurnTransition::Settle)?;

        tracing::info!(
            conversation_id = %self.session,
            turn = turn.0,
            fulfilled = reply_message_id.is_some(),
            transcript_len = self.store.len(),
            "chat turn settled"
        );

        Ok(TurnOutcome {
            turn,
            reply_message_id,
            notice,
        })
    }

    /// Runs one full turn against `transport`.
    pub async fn submit(
        &mut self,
        transport: &dyn ChatTransport,
        text: &str,
    ) -> Result<TurnOutcome, TurnRejection> {
        let pending = self.begin_turn(text)?;
        let result = transport
            .send(&pending.text, &pending.conversation_id)
            .await;
        self.complete_turn(pending.turn, result)
    }
}

#[cfg(test)]
mod tests {
    use nova_transport::TransportError;

    use super::*;
    use crate::message::Speaker;
    use crate::notice::{DELIVERED_NOTICE, NoticeKind};

    fn conversation() -> Conversation {
        Conversation::with_session(ConversationSession::from_raw("session-1"), "welcome aboard")
    }

    #[test]
    fn begin_turn_appends_user_message_and_disables_input() {
        let mut conversation = conversation();
        assert!(!conversation.is_typing());
        assert!(conversation.input_enabled());

        let pending = conversation.begin_turn("hello").unwrap();

        assert_eq!(pending.conversation_id, "session-1");
        assert_eq!(pending.text, "hello");
        assert!(conversation.is_typing());
        assert!(!conversation.input_enabled());
        let last = conversation.store().last().unwrap();
        assert_eq!(last.id(), &pending.user_message_id);
        assert_eq!(last.speaker(), Speaker::User);
    }

    #[test]
    fn blank_text_is_not_a_turn() {
        let mut conversation = conversation();
        assert_eq!(
            conversation.begin_turn("  \n "),
            Err(TurnRejection::EmptyMessage)
        );
        assert_eq!(conversation.store().len(), 1);
        assert_eq!(conversation.state(), &TurnState::Idle);
    }

    #[test]
    fn overlapping_submit_is_rejected_without_appending() {
        let mut conversation = conversation();
        let first = conversation.begin_turn("one").unwrap();

        let second = conversation.begin_turn("two");

        assert!(matches!(
            second,
            Err(TurnRejection::AlreadySending { active, .. }) if active == first.turn
        ));
        assert_eq!(conversation.store().user_turn_count(), 1);
    }

    #[test]
    fn fulfilled_turn_appends_reply_after_user_turn() {
        let mut conversation = conversation();
        let pending = conversation.begin_turn("hello").unwrap();

        let outcome = conversation
            .complete_turn(pending.turn, Ok("hi there".to_string()))
            .unwrap();

        assert!(outcome.is_fulfilled());
        assert_eq!(outcome.notice.kind, NoticeKind::Success);
        assert_eq!(outcome.notice.text, DELIVERED_NOTICE);
        assert_eq!(conversation.state(), &TurnState::Idle);
        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].text(), "hello");
        assert_eq!(messages[2].text(), "hi there");
        assert_eq!(Some(messages[2].id()), outcome.reply_message_id.as_ref());
    }

    #[test]
    fn failed_turn_keeps_user_message_and_reports_detail() {
        let mut conversation = conversation();
        let pending = conversation.begin_turn("x").unwrap();

        let outcome = conversation
            .complete_turn(
                pending.turn,
                Err(TransportError::ServerStatus {
                    stage: "test",
                    status: 500,
                    detail: Some("rate limited".to_string()),
                }),
            )
            .unwrap();

        assert!(!outcome.is_fulfilled());
        assert!(outcome.notice.is_failure());
        assert_eq!(outcome.notice.text, "rate limited");
        assert!(!conversation.is_typing());
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.store().last().map(ChatMessage::text), Some("x"));
    }

    #[test]
    fn stale_completion_is_rejected() {
        let mut conversation = conversation();
        let pending = conversation.begin_turn("one").unwrap();
        conversation
            .complete_turn(pending.turn, Ok("reply".to_string()))
            .unwrap();

        let replay = conversation.complete_turn(pending.turn, Ok("again".to_string()));

        assert_eq!(replay, Err(TurnRejection::NoPendingTurn));
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn turn_ids_advance_per_submission() {
        let mut conversation = conversation();
        let first = conversation.begin_turn("one").unwrap();
        conversation
            .complete_turn(first.turn, Ok("1".to_string()))
            .unwrap();
        let second = conversation.begin_turn("two").unwrap();

        assert!(second.turn > first.turn);
        assert_eq!(second.conversation_id, first.conversation_id);
    }
}
