use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::PanelMode;
use crate::conversation::DEFAULT_FALLBACK;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Embedder-facing settings. Every field has a default so a host page only
/// needs to supply what it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub title: String,
    pub subtitle: String,
    pub greeting: String,
    pub fallback_message: String,
    pub placeholder: String,
    pub panel_mode: PanelMode,
    /// Upper bound on how long an open/close animation may take before the
    /// transition is committed without its completion event.
    pub transition_fallback_ms: u64,
    pub api_base: String,
}

impl WidgetConfig {
    pub fn transition_fallback(&self) -> Duration {
        Duration::from_millis(self.transition_fallback_ms)
    }

    /// Parses the host page's JSON overrides.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "AI Assistant".to_string(),
            subtitle: "Ask about Reykal".to_string(),
            greeting: "Hello! I'm Reykal's AI assistant. Feel free to ask me anything about \
                       his skills, projects, or experience."
                .to_string(),
            fallback_message: DEFAULT_FALLBACK.to_string(),
            placeholder: "Ask a question...".to_string(),
            panel_mode: PanelMode::Resizable,
            transition_fallback_ms: 800,
            api_base: option_env!("ASSISTANT_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
        }
    }
}
