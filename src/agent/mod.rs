use std::future::Future;

use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use tracing::{debug, error};
use widget_core::{Message, Role};

use crate::config::Config;
use crate::errors::AppError;

const PROVIDER: &str = "Gemini";

/// System prompt for the portfolio assistant.
fn preamble(owner: &str) -> String {
    format!(
        "You are {owner}'s AI assistant, embedded on {owner}'s personal portfolio site. \
         Answer visitors' questions about {owner}'s skills, projects, and experience. \
         Be concise, friendly, and professional. \
         If you don't know something about {owner}, say so instead of guessing."
    )
}

/// Builds a rig [`RigMessage`] history list from earlier widget turns.
fn to_rig_history(history: &[Message]) -> Vec<RigMessage> {
    history
        .iter()
        .map(|m| match m.role {
            Role::User => RigMessage::user(&m.text),
            Role::Model => RigMessage::assistant(&m.text),
        })
        .collect()
}

/// Something that can answer one user turn given the earlier exchanges.
pub trait ReplyAgent: Clone + Send + Sync + 'static {
    fn reply(
        &self,
        history: &[Message],
        user_message: &str,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Runs a single chat turn against Gemini through rig.
/// A fresh agent is built per request and the history is replayed each time.
#[derive(Clone)]
pub struct GeminiAgentService {
    client: gemini::Client,
    model: String,
    preamble: String,
}

impl GeminiAgentService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = gemini::Client::builder()
            .api_key(config.gemini_api_key.as_str())
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Gemini client: {e}")))?;
        Ok(Self {
            client,
            model: config.model.clone(),
            preamble: preamble(&config.owner_name),
        })
    }
}

impl ReplyAgent for GeminiAgentService {
    async fn reply(&self, history: &[Message], user_message: &str) -> Result<String, AppError> {
        let agent = self.client.agent(&self.model).preamble(&self.preamble).build();

        debug!(model = %self.model, turns = history.len(), "replaying chat history");

        agent
            .chat(user_message, to_rig_history(history))
            .await
            .map_err(|e| {
                error!("{PROVIDER} inference failed: {e}");
                classify(&e.to_string(), &self.model)
            })
    }
}

/// Maps a provider error message onto the closest [`AppError`].
fn classify(message: &str, model: &str) -> AppError {
    let lower = message.to_lowercase();
    if lower.contains("connection refused") || lower.contains("connect") || lower.contains("timed out") {
        AppError::ProviderUnavailable { provider: PROVIDER.to_string() }
    } else if lower.contains("model") && lower.contains("not found") {
        AppError::ModelNotFound { model_name: model.to_string() }
    } else {
        AppError::InferenceError { message: message.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_names_the_owner() {
        let text = preamble("Ada");
        assert!(text.contains("Ada's AI assistant"));
        assert!(text.contains("portfolio"));
    }

    #[test]
    fn history_keeps_order_and_roles() {
        let history = [Message::user("hi"), Message::model("hello"), Message::user("more")];
        let rig_history = to_rig_history(&history);
        assert_eq!(rig_history.len(), 3);
        assert!(matches!(rig_history[0], RigMessage::User { .. }));
        assert!(matches!(rig_history[1], RigMessage::Assistant { .. }));
        assert!(matches!(rig_history[2], RigMessage::User { .. }));
    }

    #[test]
    fn provider_errors_are_classified() {
        assert!(matches!(
            classify("error sending request: Connection refused", "m"),
            AppError::ProviderUnavailable { .. }
        ));
        assert!(matches!(
            classify("models/gemini-x is not found for API version v1beta", "gemini-x"),
            AppError::ModelNotFound { ref model_name } if model_name == "gemini-x"
        ));
        assert!(matches!(
            classify("quota exceeded", "m"),
            AppError::InferenceError { .. }
        ));
    }
}
