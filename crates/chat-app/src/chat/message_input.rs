use gpui::*;
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    v_flex,
};

use crate::chat::events::Submit;

pub const INPUT_PLACEHOLDER: &str = "Type your message...";
const MIN_ROWS: usize = 1;
const MAX_ROWS: usize = 6;

/// Text that Enter would submit, or `None` when there is nothing to send.
///
/// The multi-line editor inserts a newline before reporting Enter; that one
/// trailing newline is not part of the message.
pub fn draft_submission(value: &str) -> Option<&str> {
    let draft = value.strip_suffix('\n').unwrap_or(value);
    (!draft.trim().is_empty()).then_some(draft)
}

/// Composer for the next user turn.
///
/// Only emits [`Submit`]; the draft stays in place until the chat view accepts
/// the turn and calls [`MessageInput::clear`], so a refused submit loses
/// nothing. `enabled` mirrors the conversation and is pushed on every sync.
pub struct MessageInput {
    input_state: Entity<InputState>,
    enabled: bool,
}

impl EventEmitter<Submit> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(INPUT_PLACEHOLDER)
                .auto_grow(MIN_ROWS, MAX_ROWS)
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| match event {
                // Shift+Enter keeps the newline the editor just inserted.
                InputEvent::PressEnter { secondary: false } if !window.modifiers().shift => {
                    this.submit_draft(window, cx);
                }
                _ => {}
            },
        )
        .detach();

        Self {
            input_state,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool, cx: &mut Context<Self>) {
        if self.enabled != enabled {
            self.enabled = enabled;
            cx.notify();
        }
    }

    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
    }

    fn submit_draft(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let value = self.input_state.read(cx).value().to_string();
        let draft = draft_submission(&value).map(str::to_string);

        if let Some(restored) = value.strip_suffix('\n') {
            let restored = restored.to_string();
            self.input_state.update(cx, |state, cx| {
                state.set_value(restored, window, cx);
            });
        }

        if !self.enabled {
            return;
        }
        if let Some(content) = draft {
            cx.emit(Submit::new(content));
        }
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let disabled = !self.enabled;

        v_flex()
            .w_full()
            .max_w(px(896.))
            .mx_auto()
            .gap_2()
            .p_3()
            .rounded_2xl()
            .border_1()
            .border_color(theme.border)
            .bg(theme.secondary)
            .child(Input::new(&self.input_state).w_full().disabled(disabled))
            .child(
                h_flex().w_full().justify_end().child(
                    Button::new("send-message")
                        .small()
                        .primary()
                        .icon(IconName::ArrowUp)
                        .child("Send")
                        .disabled(disabled)
                        .on_click(cx.listener(|this, _, window, cx| {
                            this.submit_draft(window, cx);
                        })),
                ),
            )
    }
}
