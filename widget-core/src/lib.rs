//! Platform-independent core of the portfolio chat widget: the message log,
//! the panel's open/close state machine and the single-flight conversation
//! controller. The Leptos shell and the assistant service both build on it.

pub mod animation;
pub mod config;
pub mod conversation;
pub mod message;
pub mod session;
pub mod store;
pub mod wire;

pub use animation::{
    Animation, AnimationController, CompletionSignal, EntryAnimation, ExitAnimation, PanelMode,
    Transition, TransitionError, Trigger, Visibility,
};
pub use config::WidgetConfig;
pub use conversation::{
    Assistant, AssistantError, ConversationController, SendOutcome, can_submit,
};
pub use message::{Message, Role};
pub use session::{SessionCell, SessionState};
pub use store::MessageStore;
