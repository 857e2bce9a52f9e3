use std::cell::RefCell;

use gloo_net::http::Request;
use widget_core::wire::{ChatRequest, ChatResponse, ErrorBody};
use widget_core::{Assistant, AssistantError, Message};

/// Talks to the assistant service over `POST /api/chat`.
///
/// Keeps the successful exchanges of this page session and ships them with
/// each request, so the widget core only ever hands over the latest turn.
pub struct HttpAssistant {
    api_base: String,
    history: RefCell<Vec<Message>>,
}

impl HttpAssistant {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            history: RefCell::new(Vec::new()),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base)
    }
}

impl Assistant for HttpAssistant {
    async fn continue_conversation(&self, text: &str) -> Result<String, AssistantError> {
        let body = ChatRequest {
            message: text.to_string(),
            history: self.history.borrow().clone(),
        };

        let resp = Request::post(&self.chat_url())
            .json(&body)
            .map_err(|e| AssistantError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        if !resp.ok() {
            let message = match resp.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => resp.status_text(),
            };
            return Err(AssistantError::Status { status: resp.status(), message });
        }

        let ChatResponse { reply } = resp
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))?;

        if !reply.trim().is_empty() {
            let mut history = self.history.borrow_mut();
            history.push(Message::user(text));
            history.push(Message::model(reply.clone()));
        }
        Ok(reply)
    }
}
