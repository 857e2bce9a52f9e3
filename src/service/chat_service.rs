use tracing::{debug, warn};
use widget_core::wire::{ChatRequest, ChatResponse};
use widget_core::Message;

use crate::agent::ReplyAgent;
use crate::errors::AppError;

const MAX_MESSAGE_LENGTH: usize = 8000;
/// Most recent turns replayed to the model; older ones are dropped.
const MAX_HISTORY_TURNS: usize = 40;

#[derive(Clone)]
pub struct ChatService<A> {
    agent: A,
}

impl<A: ReplyAgent> ChatService<A> {
    pub fn new(agent: A) -> Self {
        Self { agent }
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::EmptyField { field_name: "message".to_string() });
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: message.chars().count(),
            });
        }

        // ── History: drop blank turns, keep the most recent window ────────────
        let history = recent_history(request.history);

        // ── Call the Gemini agent via rig ─────────────────────────────────────
        let reply = self.agent.reply(&history, message).await?;
        if reply.trim().is_empty() {
            warn!("Agent returned an empty reply");
            return Err(AppError::EmptyReply);
        }

        debug!(chars = reply.len(), "Agent replied");
        Ok(ChatResponse { reply })
    }
}

fn recent_history(history: Vec<Message>) -> Vec<Message> {
    let mut history: Vec<Message> = history
        .into_iter()
        .filter(|m| !m.text.trim().is_empty())
        .collect();
    if history.len() > MAX_HISTORY_TURNS {
        history.drain(..history.len() - MAX_HISTORY_TURNS);
    }
    history
}
