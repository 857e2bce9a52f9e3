use axum::extract::State;
use axum::Json;
use widget_core::wire::{ChatRequest, ChatResponse};

use crate::agent::ReplyAgent;
use crate::errors::AppError;
use crate::service::chat_service::ChatService;

/// POST `/api/chat`: answers the widget's latest turn as JSON
pub async fn chat_handler<A: ReplyAgent>(
    State(svc): State<ChatService<A>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    svc.chat(request).await.map(Json)
}

/// GET `/health`: liveness probe
pub async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use widget_core::Message;

    use super::*;

    #[derive(Clone)]
    struct EchoAgent;

    impl ReplyAgent for EchoAgent {
        async fn reply(&self, history: &[Message], user_message: &str) -> Result<String, AppError> {
            Ok(format!("{} after {} turns", user_message, history.len()))
        }
    }

    #[tokio::test]
    async fn chat_handler_returns_reply() {
        let request = ChatRequest {
            message: "hello".to_string(),
            history: vec![Message::user("hi"), Message::model("hey")],
        };

        let Json(response) = chat_handler(State(ChatService::new(EchoAgent)), Json(request))
            .await
            .unwrap();

        assert_eq!(response.reply, "hello after 2 turns");
    }

    #[tokio::test]
    async fn chat_handler_maps_validation_to_bad_request() {
        let request = ChatRequest { message: String::new(), history: vec![] };

        let response = chat_handler(State(ChatService::new(EchoAgent)), Json(request))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health_handler().await, "ok");
    }
}
