use std::sync::Arc;

use crate::message::Message;

/// Append-only log of the turns in the current session.
///
/// Snapshots are shared `Arc`s; appending after a snapshot was taken copies
/// the backing vector so the snapshot keeps its contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageStore {
    messages: Arc<Vec<Message>>,
}

impl MessageStore {
    /// Store holding only the synthetic greeting turn.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self { messages: Arc::new(vec![Message::model(greeting)]) }
    }

    pub fn append(&mut self, message: Message) {
        Arc::make_mut(&mut self.messages).push(message);
    }

    pub fn snapshot(&self) -> Arc<Vec<Message>> {
        Arc::clone(&self.messages)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn seeded_store_holds_one_model_turn() {
        let store = MessageStore::seeded("hello");
        assert_eq!(store.len(), 1);
        assert_eq!(store.last().map(|m| m.role), Some(Role::Model));
    }

    #[test]
    fn append_preserves_insertion_order_and_duplicates() {
        let mut store = MessageStore::seeded("hello");
        store.append(Message::user("a"));
        store.append(Message::user("a"));
        store.append(Message::model("b"));

        let texts: Vec<_> = store.snapshot().iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, ["hello", "a", "a", "b"]);
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let mut store = MessageStore::seeded("hello");
        let before = store.snapshot();
        store.append(Message::user("next"));

        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
    }
}
