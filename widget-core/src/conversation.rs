//! Request lifecycle around the single outstanding AI call.

use std::future::Future;

use thiserror::Error;

use crate::message::Message;
use crate::session::{RequestInFlight, SessionCell};

/// User-facing text appended when the assistant cannot be reached.
pub const DEFAULT_FALLBACK: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Could not encode request: {0}")]
    Encode(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Assistant returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed assistant response: {0}")]
    Decode(String),

    #[error("Assistant returned an empty reply")]
    EmptyReply,
}

/// The external conversational-AI collaborator. Only the latest trimmed user
/// turn is passed; any multi-turn context is the implementor's business.
pub trait Assistant {
    fn continue_conversation(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<String, AssistantError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Another request is outstanding; nothing happened.
    Busy,
    Replied,
    /// The collaborator failed and the fallback text was appended.
    FellBack,
    /// The session went away before the request could start or settle.
    Discarded,
}

/// Whether the submit control should be enabled.
pub fn can_submit(input: &str, is_loading: bool) -> bool {
    !is_loading && !input.trim().is_empty()
}

pub struct ConversationController<A> {
    assistant: A,
    fallback: String,
}

impl<A: Assistant> ConversationController<A> {
    pub fn new(assistant: A) -> Self {
        Self { assistant, fallback: DEFAULT_FALLBACK.to_string() }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn assistant(&self) -> &A {
        &self.assistant
    }

    /// Sends one user turn.
    ///
    /// Appends the raw text as a user message, raises the loading flag, asks
    /// the assistant with the trimmed text, then appends either its reply or
    /// the fallback and clears the flag. Failures are logged, never returned.
    pub async fn send(&self, session: &impl SessionCell, text: &str) -> SendOutcome {
        let prompt = text.trim();
        if prompt.is_empty() {
            return SendOutcome::Ignored;
        }

        match session.with_session(|s| s.begin_request(text)) {
            None => return SendOutcome::Discarded,
            Some(Err(RequestInFlight)) => {
                log::debug!("send rejected: a request is already outstanding");
                return SendOutcome::Busy;
            }
            Some(Ok(())) => {}
        }

        let (reply, outcome) = match self.assistant.continue_conversation(prompt).await {
            Ok(reply) if !reply.trim().is_empty() => (Message::model(reply), SendOutcome::Replied),
            Ok(_) => {
                log::warn!("Error getting response from AI: {}", AssistantError::EmptyReply);
                (Message::model(self.fallback.clone()), SendOutcome::FellBack)
            }
            Err(e) => {
                log::error!("Error getting response from AI: {e}");
                (Message::model(self.fallback.clone()), SendOutcome::FellBack)
            }
        };

        match session.with_session(|s| s.finish_request(reply)) {
            Some(()) => outcome,
            None => {
                log::debug!("session dropped before the reply settled");
                SendOutcome::Discarded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::message::Role;
    use crate::session::SessionState;

    /// Answers every prompt with a fixed result and records what it saw.
    struct MockAssistant {
        reply: Result<&'static str, &'static str>,
        prompts: RefCell<Vec<String>>,
    }

    impl MockAssistant {
        fn ok(reply: &'static str) -> Self {
            Self { reply: Ok(reply), prompts: RefCell::new(Vec::new()) }
        }

        fn failing(message: &'static str) -> Self {
            Self { reply: Err(message), prompts: RefCell::new(Vec::new()) }
        }
    }

    impl Assistant for MockAssistant {
        async fn continue_conversation(&self, text: &str) -> Result<String, AssistantError> {
            self.prompts.borrow_mut().push(text.to_string());
            self.reply
                .map(str::to_string)
                .map_err(|e| AssistantError::Network(e.to_string()))
        }
    }

    /// Observes the session while the request is outstanding.
    struct Probe {
        session: Rc<RefCell<SessionState>>,
        loading_seen: Cell<Option<bool>>,
    }

    impl Assistant for Probe {
        async fn continue_conversation(&self, _text: &str) -> Result<String, AssistantError> {
            self.loading_seen.set(Some(self.session.borrow().is_loading()));
            Ok("ok".to_string())
        }
    }

    fn session() -> Rc<RefCell<SessionState>> {
        Rc::new(RefCell::new(SessionState::default()))
    }

    #[tokio::test]
    async fn non_empty_send_appends_user_and_model_turns() {
        let session = session();
        let controller = ConversationController::new(MockAssistant::ok("42"));

        let outcome = controller.send(&session, "question").await;

        assert_eq!(outcome, SendOutcome::Replied);
        let state = session.borrow();
        assert_eq!(state.message_count(), 3);
        assert_eq!(state.last_message(), Some(&Message::model("42")));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn every_send_adds_exactly_two_turns() {
        let session = session();
        let controller = ConversationController::new(MockAssistant::ok("sure"));

        for (i, text) in ["a", "b", "  c  "].into_iter().enumerate() {
            assert!(!session.borrow().is_loading());
            controller.send(&session, text).await;
            assert_eq!(session.borrow().message_count(), 1 + 2 * (i + 1));
            assert!(!session.borrow().is_loading());
        }
    }

    #[tokio::test]
    async fn blank_sends_are_no_ops() {
        let session = session();
        let controller = ConversationController::new(MockAssistant::ok("unused"));

        assert_eq!(controller.send(&session, "").await, SendOutcome::Ignored);
        assert_eq!(controller.send(&session, "   ").await, SendOutcome::Ignored);

        assert_eq!(session.borrow().message_count(), 1);
        assert!(!session.borrow().is_loading());
        assert!(controller.assistant().prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn stores_raw_text_but_sends_trimmed_text() {
        let session = session();
        let controller = ConversationController::new(MockAssistant::ok("hi"));

        controller.send(&session, "  hello there \n").await;

        let messages = session.borrow().messages();
        assert_eq!(messages[1], Message::user("  hello there \n"));
        assert_eq!(*controller.assistant().prompts.borrow(), ["hello there"]);
    }

    #[tokio::test]
    async fn failure_appends_single_fallback_turn() {
        let session = session();
        let controller = ConversationController::new(MockAssistant::failing("connection refused"));

        let outcome = controller.send(&session, "hello").await;

        assert_eq!(outcome, SendOutcome::FellBack);
        let messages = session.borrow().messages();
        let model_replies: Vec<_> = messages[1..].iter().filter(|m| m.role == Role::Model).collect();
        assert_eq!(model_replies, [&Message::model(DEFAULT_FALLBACK)]);
        assert!(!session.borrow().is_loading());
    }

    #[tokio::test]
    async fn blank_reply_falls_back() {
        let session = session();
        let controller =
            ConversationController::new(MockAssistant::ok("  ")).with_fallback("try later");

        assert_eq!(controller.send(&session, "hi").await, SendOutcome::FellBack);
        assert_eq!(session.borrow().last_message(), Some(&Message::model("try later")));
    }

    #[tokio::test]
    async fn send_while_loading_is_rejected() {
        let session = session();
        session.borrow_mut().begin_request("first").unwrap();
        let controller = ConversationController::new(MockAssistant::ok("unused"));

        assert_eq!(controller.send(&session, "second").await, SendOutcome::Busy);
        assert_eq!(session.borrow().message_count(), 2);
        assert!(session.borrow().is_loading());
        assert!(controller.assistant().prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn loading_is_raised_while_request_is_outstanding() {
        let session = session();
        let probe = Probe { session: Rc::clone(&session), loading_seen: Cell::new(None) };
        let controller = ConversationController::new(probe);

        controller.send(&session, "hi").await;

        assert_eq!(controller.assistant().loading_seen.get(), Some(true));
        assert!(!session.borrow().is_loading());
    }

    #[tokio::test]
    async fn reply_is_appended_after_panel_closed() {
        let session = session();
        {
            let mut state = session.borrow_mut();
            state.panel.open().unwrap();
            state.panel.close().unwrap();
        }
        let controller = ConversationController::new(MockAssistant::ok("late"));

        controller.send(&session, "hi").await;

        assert_eq!(session.borrow().last_message(), Some(&Message::model("late")));
    }

    #[test]
    fn submit_requires_text_and_idle_session() {
        assert!(can_submit("hi", false));
        assert!(!can_submit("hi", true));
        assert!(!can_submit(" \t", false));
        assert!(!can_submit("", false));
    }
}
