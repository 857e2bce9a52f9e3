use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use widget_core::{
    AnimationController, CompletionSignal, ConversationController, SessionCell, SessionState,
    Transition, TransitionError, WidgetConfig,
};

use crate::api::HttpAssistant;
use crate::dom;

/// Lets the conversation controller mutate the session signal directly.
#[derive(Clone, Copy)]
struct SignalSession(RwSignal<SessionState>);

impl SessionCell for SignalSession {
    fn with_session<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// Widget state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct WidgetState {
    pub session: RwSignal<SessionState>,
    pub config: StoredValue<WidgetConfig>,
    controller: StoredValue<Rc<ConversationController<HttpAssistant>>, LocalStorage>,
}

impl WidgetState {
    /// Create a new `WidgetState` and provide it in the current Leptos context.
    pub fn provide(config: WidgetConfig) -> Self {
        let panel = AnimationController::new(config.panel_mode)
            .with_reduced_motion(dom::prefers_reduced_motion());
        let session = RwSignal::new(SessionState::new(config.greeting.clone(), panel));

        let controller = ConversationController::new(HttpAssistant::new(&config.api_base))
            .with_fallback(config.fallback_message.clone());

        let state = Self {
            session,
            config: StoredValue::new(config),
            controller: StoredValue::new_local(Rc::new(controller)),
        };

        provide_context(state);
        state
    }

    pub fn open(&self) {
        let started = self.session.try_update(|s| s.panel.open());
        self.after_trigger(started);
    }

    pub fn close(&self) {
        let started = self.session.try_update(|s| s.panel.close());
        self.after_trigger(started);
    }

    pub fn toggle_maximize(&self) {
        if let Some(Err(e)) = self.session.try_update(|s| s.panel.toggle_maximize()) {
            log::debug!("Ignored maximize toggle: {e}");
        }
    }

    /// Handles `animationend` from the panel subtree.
    pub fn animation_finished(&self, signal: CompletionSignal) {
        // Bubbles and the thinking dots animate too; don't wake subscribers for those.
        if signal == CompletionSignal::Descendant {
            return;
        }
        if let Some(Some(visibility)) = self.session.try_update(|s| s.panel.on_animation_end(signal)) {
            log::debug!("Panel is now {visibility}");
        }
    }

    /// Send a user turn; the request runs in the background.
    pub fn send(&self, text: String) {
        let controller = self.controller.get_value();
        let session = SignalSession(self.session);

        spawn_local(async move {
            let outcome = controller.send(&session, &text).await;
            log::debug!("Send settled: {outcome:?}");
        });
    }

    fn after_trigger(&self, started: Option<Result<Transition, TransitionError>>) {
        match started {
            Some(Ok(transition)) if transition.awaits_completion() => {
                self.schedule_fallback(transition.epoch);
            }
            Some(Ok(_)) | None => {}
            Some(Err(e)) => log::debug!("Ignored panel trigger: {e}"),
        }
    }

    /// Commits the transition anyway if its completion event never arrives.
    fn schedule_fallback(&self, epoch: u64) {
        let session = self.session;
        let millis = self
            .config
            .with_value(|c| u32::try_from(c.transition_fallback_ms).unwrap_or(u32::MAX));

        Timeout::new(millis, move || {
            let committed = session.try_update(|s| s.panel.on_fallback_timeout(epoch));
            if let Some(Some(visibility)) = committed {
                log::warn!("No animationend for transition {epoch}; forced panel {visibility}");
            }
        })
        .forget();
    }
}
