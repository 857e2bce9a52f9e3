use leptos::prelude::*;
use widget_core::Message;

/// A single chat turn, user turns on the right.
#[component]
pub fn ChatBubble(message: Message) -> impl IntoView {
    let (row_class, bubble_class) = if message.is_user() {
        ("chat-row chat-row--user animate-fadeIn", "chat-bubble chat-bubble--user")
    } else {
        ("chat-row chat-row--model animate-fadeIn", "chat-bubble chat-bubble--model")
    };

    view! {
        <div class=row_class>
            <div class=bubble_class>
                <p>{message.text}</p>
            </div>
        </div>
    }
}

/// Three pulsing dots shown while a reply is outstanding.
#[component]
pub fn ThinkingIndicator() -> impl IntoView {
    view! {
        <div class="chat-thinking" aria-label="Assistant is typing">
            <div class="chat-thinking__dot animate-thinking" style="animation-delay: 0s"></div>
            <div class="chat-thinking__dot animate-thinking" style="animation-delay: 0.2s"></div>
            <div class="chat-thinking__dot animate-thinking" style="animation-delay: 0.4s"></div>
        </div>
    }
}
