use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use widget_core::{AnimationController, CompletionSignal, can_submit};

use crate::components::bubble::{ChatBubble, ThinkingIndicator};
use crate::state::WidgetState;

/// Layout classes plus whatever open/close animation is playing.
fn panel_class(panel: &AnimationController) -> String {
    let layout = if panel.is_fullscreen() {
        "chat-panel chat-panel--fullscreen"
    } else {
        "chat-panel chat-panel--card"
    };
    match panel.animation() {
        Some(animation) => format!("{layout} {}", animation.class_name()),
        None => layout.to_string(),
    }
}

/// The expanded conversation surface: header, message list and input.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let session = state.session;
    let panel_ref = NodeRef::<Div>::new();

    let on_animation_end = move |ev: ev::AnimationEvent| {
        let target: Option<JsValue> = ev.target().map(Into::into);
        let root: Option<JsValue> = panel_ref.get_untracked().map(Into::into);
        state.animation_finished(CompletionSignal::from_identity(target.as_ref(), root.as_ref()));
    };

    view! {
        <div
            node_ref=panel_ref
            class=move || session.with(|s| panel_class(&s.panel))
            on:animationend=on_animation_end
        >
            <PanelHeader />
            <MessageList />
            <ChatInput />
        </div>
    }
}

#[component]
fn PanelHeader() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let session = state.session;
    let (title, subtitle) = state.config.with_value(|c| (c.title.clone(), c.subtitle.clone()));
    let supports_maximize = session.with_untracked(|s| s.panel.mode().supports_maximize());
    let is_maximized = move || session.with(|s| s.panel.is_maximized());

    view! {
        <header class="chat-header">
            <div class="chat-header__titles">
                <h2 class="chat-header__title">{title}</h2>
                <p class="chat-header__subtitle">{subtitle}</p>
            </div>
            <div class="chat-header__controls">
                {supports_maximize.then(|| view! {
                    <button
                        class="chat-header__button"
                        aria-label=move || if is_maximized() { "Minimize chat" } else { "Maximize chat" }
                        on:click=move |_| state.toggle_maximize()
                    >
                        {move || if is_maximized() { "▭" } else { "□" }}
                    </button>
                })}
                <button
                    class="chat-header__button"
                    aria-label="Close chat"
                    on:click=move |_| state.close()
                >
                    "✕"
                </button>
            </div>
        </header>
    }
}

/// Scrollable turn list; keeps the newest content in view.
#[component]
fn MessageList() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let session = state.session;
    let end_ref = NodeRef::<Div>::new();

    Effect::new(move || {
        let _ = session.with(|s| (s.message_count(), s.is_loading()));
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    view! {
        <div class="chat-messages">
            <For
                each=move || session.with(|s| s.messages().iter().cloned().enumerate().collect::<Vec<_>>())
                key=|(index, _)| *index
                let:entry
            >
                <ChatBubble message=entry.1 />
            </For>
            <Show when=move || session.with(|s| s.is_loading())>
                <ThinkingIndicator />
            </Show>
            <div node_ref=end_ref></div>
        </div>
    }
}

/// Single-line input; submit is disabled while loading or blank.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let session = state.session;
    let placeholder = state.config.with_value(|c| c.placeholder.clone());
    let (input, set_input) = signal(String::new());

    let is_loading = move || session.with(|s| s.is_loading());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        if !can_submit(&text, session.with_untracked(|s| s.is_loading())) {
            return;
        }
        set_input.set(String::new());
        state.send(text);
    };

    view! {
        <div class="chat-input-area">
            <form class="chat-form" on:submit=on_submit>
                <input
                    type="text"
                    class="chat-form__input"
                    placeholder=placeholder
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    disabled=is_loading
                />
                <button
                    type="submit"
                    class="chat-form__send"
                    aria-label="Send message"
                    disabled=move || !can_submit(&input.get(), is_loading())
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}
