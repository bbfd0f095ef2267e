//! Mode-aware routing of play cues to the Basic or Advanced backend.

use smallvec::SmallVec;

use crate::backend::{ClipActuator, PulseActuator};
use crate::config::FeedbackConfig;
use crate::error::FeedbackError;
use crate::hand::{Hand, HandTarget};
use crate::math::clamp01;
use crate::mode::HapticMode;

/// Whether a cue follows the mode flag or is always rendered as a pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CueRouting {
    #[default]
    ByMode,
    /// Short procedural clicks that no clip can represent.
    PulseOnly,
}

/// A logical "play this voice" request.
#[derive(Clone, Debug)]
pub struct Cue<'a> {
    pub config: &'a FeedbackConfig,
    pub hand: HandTarget,
    /// Scales `basic_amplitude` for parametric pulses.
    pub amplitude: f32,
    pub duration_sec: Option<f32>,
    /// Replaces `advanced_amplitude` for clip playback.
    pub clip_amplitude: Option<f32>,
    pub routing: CueRouting,
}

impl<'a> Cue<'a> {
    pub fn new(config: &'a FeedbackConfig, hand: HandTarget) -> Self {
        Self {
            config,
            hand,
            amplitude: 1.0,
            duration_sec: None,
            clip_amplitude: None,
            routing: CueRouting::ByMode,
        }
    }

    pub fn amplitude(mut self, multiplier: f32) -> Self {
        self.amplitude = multiplier;
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration_sec = Some(seconds);
        self
    }

    pub fn clip_amplitude(mut self, amplitude: f32) -> Self {
        self.clip_amplitude = Some(amplitude);
        self
    }

    pub fn pulse_only(mut self) -> Self {
        self.routing = CueRouting::PulseOnly;
        self
    }
}

/// Which backend rendered a cue and with what parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Routed {
    Pulse {
        hands: SmallVec<[Hand; 2]>,
        amplitude: f32,
        duration_sec: f32,
    },
    Clip {
        hand: HandTarget,
        amplitude: f32,
    },
}

/// Routes cues to exactly one of the two backends.
///
/// Switching modes never touches playback already started on the other
/// backend; callers stop their own handles.
#[derive(Default)]
pub struct FeedbackDispatcher {
    left: Option<Box<dyn PulseActuator>>,
    right: Option<Box<dyn PulseActuator>>,
    clips: Option<Box<dyn ClipActuator>>,
    /// Unbound hands already reported; later skips log at debug.
    warned_unbound: [bool; 2],
}

impl FeedbackDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pulse(mut self, hand: Hand, actuator: Box<dyn PulseActuator>) -> Self {
        self.bind_pulse(hand, actuator);
        self
    }

    pub fn with_clips(mut self, actuator: Box<dyn ClipActuator>) -> Self {
        self.clips = Some(actuator);
        self
    }

    pub fn bind_pulse(&mut self, hand: Hand, actuator: Box<dyn PulseActuator>) {
        self.warned_unbound[hand_slot(hand)] = false;
        match hand {
            Hand::Left => self.left = Some(actuator),
            Hand::Right => self.right = Some(actuator),
        }
    }

    /// Whether a pulse to the unbound `hand` has already been reported.
    pub fn warned_unbound(&self, hand: Hand) -> bool {
        self.warned_unbound[hand_slot(hand)]
    }

    pub fn has_pulse(&self, hand: Hand) -> bool {
        match hand {
            Hand::Left => self.left.is_some(),
            Hand::Right => self.right.is_some(),
        }
    }

    fn pulse_slot(&mut self, hand: Hand) -> Option<&mut Box<dyn PulseActuator>> {
        match hand {
            Hand::Left => self.left.as_mut(),
            Hand::Right => self.right.as_mut(),
        }
    }

    /// Render `cue` on the backend selected by `mode`.
    pub fn play(&mut self, mode: HapticMode, cue: &Cue<'_>) -> Result<Routed, FeedbackError> {
        match (mode, cue.routing) {
            (HapticMode::Advanced, CueRouting::ByMode) => self.play_clip(cue),
            _ => self.pulse(cue),
        }
    }

    /// Parametric pulse on each targeted hand. Unbound hands are skipped.
    pub fn pulse(&mut self, cue: &Cue<'_>) -> Result<Routed, FeedbackError> {
        let amplitude = clamp01(cue.config.basic_amplitude * cue.amplitude);
        let duration_sec = cue
            .duration_sec
            .unwrap_or_else(|| cue.config.default_pulse_duration())
            .max(0.0);
        log::debug!(
            "[dispatch] pulse hand={:?} amp={amplitude:.2} dur={duration_sec:.3}s",
            cue.hand
        );
        let mut hands = SmallVec::new();
        for hand in cue.hand.hands() {
            match self.pulse_slot(hand) {
                Some(actuator) => {
                    actuator.send_pulse(amplitude, duration_sec);
                    hands.push(hand);
                }
                None => self.report_unbound(hand),
            }
        }
        if hands.is_empty() {
            return Err(FeedbackError::UnavailableActuator(match cue.hand {
                HandTarget::Left => Hand::Left,
                _ => Hand::Right,
            }));
        }
        Ok(Routed::Pulse {
            hands,
            amplitude,
            duration_sec,
        })
    }

    fn report_unbound(&mut self, hand: Hand) {
        let warned = &mut self.warned_unbound[hand_slot(hand)];
        if *warned {
            log::debug!("[dispatch] skipped {hand:?}: no actuator");
        } else {
            *warned = true;
            log::warn!("[dispatch] {}", FeedbackError::UnavailableActuator(hand));
        }
    }

    fn play_clip(&mut self, cue: &Cue<'_>) -> Result<Routed, FeedbackError> {
        let clip = cue
            .config
            .advanced_clip
            .as_ref()
            .ok_or(FeedbackError::MissingConfiguration("advanced haptic clip"))?;
        let actuator = self
            .clips
            .as_mut()
            .ok_or(FeedbackError::MissingConfiguration("clip actuator"))?;
        let amplitude = clamp01(cue.clip_amplitude.unwrap_or(cue.config.advanced_amplitude));
        log::debug!(
            "[dispatch] clip '{}' hand={:?} amp={amplitude:.2}",
            clip.name,
            cue.hand
        );
        actuator.play_clip(clip, cue.hand, amplitude);
        Ok(Routed::Clip {
            hand: cue.hand,
            amplitude,
        })
    }

    /// Zero the parametric actuators of `target`.
    pub fn stop_pulses(&mut self, target: HandTarget) {
        for hand in target.hands() {
            if let Some(actuator) = self.pulse_slot(hand) {
                actuator.send_pulse(0.0, 0.0);
            }
        }
    }

    /// Stop the clip voice of `config`, if it has one.
    pub fn stop_clip(&mut self, config: &FeedbackConfig) {
        if let (Some(clip), Some(actuator)) = (config.advanced_clip.as_ref(), self.clips.as_mut()) {
            actuator.stop_clip(clip);
        }
    }

    /// Silence both backends for `target` / `config`, regardless of mode.
    pub fn stop_all(&mut self, target: HandTarget, config: &FeedbackConfig) {
        self.stop_pulses(target);
        self.stop_clip(config);
    }
}

fn hand_slot(hand: Hand) -> usize {
    match hand {
        Hand::Left => 0,
        Hand::Right => 1,
    }
}
