use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::animation::AnimationController;
use crate::config::WidgetConfig;
use crate::message::Message;
use crate::store::MessageStore;

/// Transient state of one widget instance. Nothing here outlives the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    messages: MessageStore,
    is_loading: bool,
    pub panel: AnimationController,
}

/// Returned by [`SessionState::begin_request`] when a request is already
/// outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestInFlight;

impl SessionState {
    pub fn new(greeting: impl Into<String>, panel: AnimationController) -> Self {
        Self { messages: MessageStore::seeded(greeting), is_loading: false, panel }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.greeting.clone(), AnimationController::new(config.panel_mode))
    }

    pub fn messages(&self) -> Arc<Vec<Message>> {
        self.messages.snapshot()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Records the user's turn and raises the loading flag, unless another
    /// request is still outstanding.
    pub fn begin_request(&mut self, raw_text: &str) -> Result<(), RequestInFlight> {
        if self.is_loading {
            return Err(RequestInFlight);
        }
        self.messages.append(Message::user(raw_text));
        self.is_loading = true;
        Ok(())
    }

    /// Appends the model's turn and clears the loading flag.
    pub fn finish_request(&mut self, reply: Message) {
        self.messages.append(reply);
        self.is_loading = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

/// Shared handle to a [`SessionState`].
///
/// Access is scoped to a closure so no borrow is held across an await.
/// `None` means the session is gone (the widget was torn down).
pub trait SessionCell {
    fn with_session<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R>;
}

impl SessionCell for Rc<RefCell<SessionState>> {
    fn with_session<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        let mut state = self.try_borrow_mut().ok()?;
        Some(f(&mut state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn new_session_has_greeting_and_is_idle() {
        let state = SessionState::default();
        assert_eq!(state.message_count(), 1);
        assert_eq!(state.last_message().map(|m| m.role), Some(Role::Model));
        assert!(!state.is_loading());
        assert!(!state.panel.is_mounted());
    }

    #[test]
    fn begin_request_is_single_flight() {
        let mut state = SessionState::default();
        assert_eq!(state.begin_request("one"), Ok(()));
        assert_eq!(state.begin_request("two"), Err(RequestInFlight));
        assert_eq!(state.message_count(), 2);

        state.finish_request(Message::model("reply"));
        assert!(!state.is_loading());
        assert_eq!(state.begin_request("two"), Ok(()));
    }
}
