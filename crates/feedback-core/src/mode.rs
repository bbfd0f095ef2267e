//! Haptic rendering mode and the per-host context that carries it.

use crate::dispatch::{Cue, FeedbackDispatcher, Routed};
use crate::error::FeedbackError;

/// Which haptic backend cues are routed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HapticMode {
    /// Parametric pulses (amplitude + duration).
    #[default]
    Basic,
    /// Prerecorded haptic clips.
    Advanced,
}

impl HapticMode {
    /// Map a UI toggle: on selects clip playback.
    pub fn from_toggle(is_on: bool) -> Self {
        if is_on {
            HapticMode::Advanced
        } else {
            HapticMode::Basic
        }
    }
}

/// Shared state threaded through every station call.
///
/// Holds the dispatcher, the current mode and the session clock. The mode is
/// read once per [`FeedbackContext::play`], so a change affects the next cue
/// only.
pub struct FeedbackContext {
    pub dispatcher: FeedbackDispatcher,
    mode: HapticMode,
    clock_sec: f64,
}

impl FeedbackContext {
    pub fn new(dispatcher: FeedbackDispatcher) -> Self {
        Self {
            dispatcher,
            mode: HapticMode::default(),
            clock_sec: 0.0,
        }
    }

    pub fn mode(&self) -> HapticMode {
        self.mode
    }

    /// Switch backends for subsequent cues. Nothing in flight is stopped.
    pub fn set_mode(&mut self, mode: HapticMode) {
        if mode != self.mode {
            log::info!("[mode] {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn now(&self) -> f64 {
        self.clock_sec
    }

    /// Move the clock forward. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt_sec: f32) {
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.clock_sec += dt_sec as f64;
        }
    }

    pub fn play(&mut self, cue: &Cue<'_>) -> Result<Routed, FeedbackError> {
        self.dispatcher.play(self.mode, cue)
    }

    /// Like [`FeedbackContext::play`] but logs failures instead of returning them.
    pub fn play_logged(&mut self, tag: &str, cue: &Cue<'_>) -> Option<Routed> {
        match self.play(cue) {
            Ok(routed) => Some(routed),
            // The dispatcher already reported the unbound hand once.
            Err(e @ FeedbackError::UnavailableActuator(_)) => {
                log::debug!("[{tag}] {e}");
                None
            }
            Err(e) => {
                log::warn!("[{tag}] {e}");
                None
            }
        }
    }
}
