/// Event contracts for chat module wiring.
pub mod events;
pub mod message_input;
pub mod message_list;
pub mod scroll_manager;
pub mod view;

pub use events::{NoticeRaised, Submit};
pub use message_input::{INPUT_PLACEHOLDER, MessageInput};
pub use message_list::MessageList;
pub use scroll_manager::ScrollManager;
pub use view::ChatView;
