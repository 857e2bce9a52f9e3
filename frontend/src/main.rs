mod api;
mod components;
mod dom;
mod state;

use leptos::prelude::*;
use leptos::mount::mount_to_body;

use components::widget::ChatWidget;
use state::WidgetState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    WidgetState::provide(dom::load_config());

    view! { <ChatWidget /> }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
