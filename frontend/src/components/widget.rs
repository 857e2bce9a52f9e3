use leptos::prelude::*;

use crate::components::panel::ChatPanel;
use crate::state::WidgetState;

/// Floating trigger and panel. Exactly one of them is in the tree at a time.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let mounted = move || state.session.with(|s| s.panel.is_mounted());

    view! {
        <div class="chat-widget">
            <Show when=mounted fallback=|| view! { <TriggerButton /> }>
                <ChatPanel />
            </Show>
        </div>
    }
}

#[component]
fn TriggerButton() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    view! {
        <button
            class="chat-trigger animate-fabIn"
            aria-label="Open AI Assistant"
            on:click=move |_| state.open()
        >
            <span class="chat-trigger__icon" aria-hidden="true">"✦"</span>
        </button>
    }
}
