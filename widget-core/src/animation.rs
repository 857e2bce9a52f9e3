//! Visibility lifecycle of the chat panel.
//!
//! The panel moves through `Closed → Opening → Open → Closing → Closed`.
//! The two animated states are left only when the rendering layer reports
//! that the panel root finished its animation, or when the fallback timer
//! for the current transition fires.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Opening,
    Open,
    Closing,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Closed => "closed",
            Visibility::Opening => "opening",
            Visibility::Open => "open",
            Visibility::Closing => "closing",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flag selecting between the resizable card and the
/// fullscreen-only overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    #[default]
    Resizable,
    FullscreenOnly,
}

impl PanelMode {
    pub fn supports_maximize(&self) -> bool {
        matches!(self, PanelMode::Resizable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAnimation {
    SlideInUp,
    FadeIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAnimation {
    SlideOutDown,
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Entry(EntryAnimation),
    Exit(ExitAnimation),
}

impl Animation {
    pub fn class_name(&self) -> &'static str {
        match self {
            Animation::Entry(EntryAnimation::SlideInUp) => "animate-slideInUp",
            Animation::Entry(EntryAnimation::FadeIn) => "animate-modalFadeIn",
            Animation::Exit(ExitAnimation::SlideOutDown) => "animate-slideOutDown",
            Animation::Exit(ExitAnimation::FadeOut) => "animate-modalFadeOut",
        }
    }
}

/// Origin of an animation-completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSignal {
    PanelRoot,
    /// Bubbled up from a child element (message bubbles, the thinking dots).
    Descendant,
}

impl CompletionSignal {
    /// Classifies an event by comparing its target against the panel root.
    /// A missing root or target never counts as the panel.
    pub fn from_identity<T: PartialEq>(target: Option<&T>, root: Option<&T>) -> Self {
        match (target, root) {
            (Some(target), Some(root)) if target == root => CompletionSignal::PanelRoot,
            _ => CompletionSignal::Descendant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Open,
    Close,
    ToggleMaximize,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Trigger::Open => "open",
            Trigger::Close => "close",
            Trigger::ToggleMaximize => "toggle-maximize",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {trigger} while the panel is {from}")]
    Invalid { from: Visibility, trigger: Trigger },

    #[error("panel mode {mode:?} has no maximize control")]
    MaximizeUnsupported { mode: PanelMode },
}

/// Started transition. `animation` is `None` when the state was committed
/// immediately (reduced motion), in which case no completion is awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub epoch: u64,
    pub animation: Option<Animation>,
}

impl Transition {
    pub fn awaits_completion(&self) -> bool {
        self.animation.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationController {
    mode: PanelMode,
    reduced_motion: bool,
    visibility: Visibility,
    is_maximized: bool,
    animation: Option<Animation>,
    epoch: u64,
}

impl AnimationController {
    pub fn new(mode: PanelMode) -> Self {
        Self {
            mode,
            reduced_motion: false,
            visibility: Visibility::Closed,
            is_maximized: false,
            animation: None,
            epoch: 0,
        }
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }

    /// Class of the animation currently playing on the panel root, if any.
    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The panel subtree is in the render tree.
    pub fn is_mounted(&self) -> bool {
        self.visibility != Visibility::Closed
    }

    /// The floating trigger is shown exactly when the panel is not.
    pub fn trigger_visible(&self) -> bool {
        !self.is_mounted()
    }

    /// Fullscreen layout, either toggled or forced by the panel mode.
    pub fn is_fullscreen(&self) -> bool {
        self.is_maximized || self.mode == PanelMode::FullscreenOnly
    }

    pub fn open(&mut self) -> Result<Transition, TransitionError> {
        if self.visibility != Visibility::Closed {
            return Err(self.invalid(Trigger::Open));
        }

        // A new session always starts minimized.
        self.is_maximized = false;
        self.epoch += 1;

        if self.reduced_motion {
            self.visibility = Visibility::Open;
            self.animation = None;
        } else {
            let entry = match self.mode {
                PanelMode::Resizable => EntryAnimation::SlideInUp,
                PanelMode::FullscreenOnly => EntryAnimation::FadeIn,
            };
            self.visibility = Visibility::Opening;
            self.animation = Some(Animation::Entry(entry));
        }

        Ok(self.transition())
    }

    /// Closes with the exit matching the current layout: a slide for the
    /// anchored card, a fade for the fullscreen panel.
    pub fn close(&mut self) -> Result<Transition, TransitionError> {
        let exit = if self.is_fullscreen() {
            ExitAnimation::FadeOut
        } else {
            ExitAnimation::SlideOutDown
        };
        self.close_with(exit)
    }

    pub fn close_with(&mut self, exit: ExitAnimation) -> Result<Transition, TransitionError> {
        if !matches!(self.visibility, Visibility::Opening | Visibility::Open) {
            return Err(self.invalid(Trigger::Close));
        }

        self.epoch += 1;

        if self.reduced_motion {
            self.visibility = Visibility::Closed;
            self.animation = None;
        } else {
            self.visibility = Visibility::Closing;
            self.animation = Some(Animation::Exit(exit));
        }

        Ok(self.transition())
    }

    /// Flips between the anchored card and fullscreen. Plain layout change:
    /// the visibility state and the epoch are left alone.
    pub fn toggle_maximize(&mut self) -> Result<bool, TransitionError> {
        if !self.mode.supports_maximize() {
            return Err(TransitionError::MaximizeUnsupported { mode: self.mode });
        }
        if !matches!(self.visibility, Visibility::Opening | Visibility::Open) {
            return Err(self.invalid(Trigger::ToggleMaximize));
        }

        self.is_maximized = !self.is_maximized;
        Ok(self.is_maximized)
    }

    /// Commits the pending transition when the panel root reports that its
    /// animation finished. Returns the new visibility if anything changed.
    pub fn on_animation_end(&mut self, signal: CompletionSignal) -> Option<Visibility> {
        match signal {
            CompletionSignal::PanelRoot => self.commit(),
            CompletionSignal::Descendant => None,
        }
    }

    /// Commits the transition started at `epoch` if it is still pending.
    pub fn on_fallback_timeout(&mut self, epoch: u64) -> Option<Visibility> {
        if epoch != self.epoch {
            return None;
        }
        self.commit()
    }

    fn commit(&mut self) -> Option<Visibility> {
        let next = match self.visibility {
            Visibility::Opening => Visibility::Open,
            Visibility::Closing => Visibility::Closed,
            Visibility::Open | Visibility::Closed => return None,
        };

        // Cleared so later size changes use plain transitions instead of
        // replaying the entry animation.
        self.animation = None;
        self.visibility = next;
        Some(next)
    }

    fn transition(&self) -> Transition {
        Transition { epoch: self.epoch, animation: self.animation }
    }

    fn invalid(&self, trigger: Trigger) -> TransitionError {
        TransitionError::Invalid { from: self.visibility, trigger }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(PanelMode::default())
    }
}
