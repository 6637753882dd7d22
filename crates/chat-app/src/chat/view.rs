use std::sync::Arc;

use gpui::*;
use gpui_component::{ActiveTheme, v_flex};
use gpui_tokio_bridge::Tokio;
use nova_conversation::{
    Conversation, Notice, PendingTurn, TranscriptView, TurnId, TurnRejection, WidgetConfig,
};
use nova_transport::{ChatTransport, TransportError, TransportResult, create_transport};

use crate::chat::events::{NoticeRaised, Submit};
use crate::chat::{MessageInput, MessageList};

/// Parent coordinator for the transcript, the input and the transport.
///
/// Owns the single [`Conversation`] of the window. Each submit runs the
/// request on the tokio runtime and settles the turn back on the UI thread.
pub struct ChatView {
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    transport: Option<Arc<dyn ChatTransport>>,
    transport_error: Option<String>,
    conversation: Conversation,
}

impl EventEmitter<NoticeRaised> for ChatView {}

/// What happens to the composer draft after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftAction {
    Clear,
    Keep,
}

impl DraftAction {
    fn after(attempt: &Result<PendingTurn, TurnRejection>) -> Self {
        match attempt {
            Ok(_) => Self::Clear,
            Err(_) => Self::Keep,
        }
    }
}

impl ChatView {
    pub fn new(config: &WidgetConfig, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let message_list = cx.new(MessageList::new);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        let (transport, transport_error) = match create_transport(config.transport_config()) {
            Ok(transport) => (Some(transport), None),
            Err(error) => {
                tracing::error!(
                    stage = error.stage(),
                    error = %error,
                    "chat transport unavailable"
                );
                (None, Some(error.to_string()))
            }
        };

        cx.subscribe_in(
            &message_input,
            window,
            |this, _, event: &Submit, window, cx| {
                this.handle_submit(event, window, cx);
            },
        )
        .detach();

        let mut this = Self {
            message_list,
            message_input,
            transport,
            transport_error,
            conversation: Conversation::new(config.welcome_message.clone()),
        };
        this.sync_transcript(cx);
        this
    }

    fn handle_submit(&mut self, event: &Submit, window: &mut Window, cx: &mut Context<Self>) {
        let attempt = self.conversation.begin_turn(&event.content);
        if DraftAction::after(&attempt) == DraftAction::Clear {
            self.message_input.update(cx, |input, cx| {
                input.clear(window, cx);
            });
        }

        let pending = match attempt {
            Ok(pending) => pending,
            Err(TurnRejection::EmptyMessage) => return,
            Err(rejection) => {
                tracing::warn!(?rejection, "submit refused, draft kept");
                return;
            }
        };

        self.sync_transcript(cx);

        let Some(transport) = self.transport.clone() else {
            let details = self
                .transport_error
                .clone()
                .unwrap_or_else(|| "no chat transport configured".to_string());
            self.finish_turn(
                pending.turn,
                Err(TransportError::Interrupted {
                    stage: "create-transport",
                    details,
                }),
                cx,
            );
            return;
        };

        let turn = pending.turn;
        let request = Tokio::spawn(cx, async move {
            transport
                .send(&pending.text, &pending.conversation_id)
                .await
        });

        // The request is never cancelled; its result always settles the turn.
        cx.spawn(async move |this, cx| {
            let result = match request.await {
                Ok(result) => result,
                Err(error) => Err(TransportError::Interrupted {
                    stage: "join-chat-request",
                    details: error.to_string(),
                }),
            };

            let _ = this.update(cx, |this, cx| {
                this.finish_turn(turn, result, cx);
            });
        })
        .detach();
    }

    fn finish_turn(
        &mut self,
        turn: TurnId,
        result: TransportResult<String>,
        cx: &mut Context<Self>,
    ) {
        match self.conversation.complete_turn(turn, result) {
            Ok(outcome) => self.raise_notice(outcome.notice, cx),
            Err(rejection) => {
                tracing::error!(turn = turn.0, ?rejection, "chat turn could not be settled");
            }
        }

        self.sync_transcript(cx);
    }

    fn raise_notice(&mut self, notice: Notice, cx: &mut Context<Self>) {
        cx.emit(NoticeRaised { notice });
    }

    /// Pushes the conversation into the list and the composer.
    fn sync_transcript(&mut self, cx: &mut Context<Self>) {
        let transcript = TranscriptView::from_conversation(&self.conversation);
        let input_enabled = self.conversation.input_enabled();

        self.message_list.update(cx, |list, cx| {
            list.set_transcript(transcript, cx);
        });
        self.message_input.update(cx, |input, cx| {
            input.set_enabled(input_enabled, cx);
        });
        cx.notify();
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        v_flex()
            .size_full()
            .min_h_0()
            .bg(theme.background)
            .child(
                div()
                    .flex_1()
                    .min_h_0()
                    .overflow_hidden()
                    .child(self.message_list.clone()),
            )
            .child(
                div()
                    .w_full()
                    .flex_shrink_0()
                    .px_6()
                    .pb_4()
                    .child(self.message_input.clone()),
            )
    }
}
