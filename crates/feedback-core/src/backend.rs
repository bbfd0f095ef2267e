//! Narrow interfaces to the host's rendering backends.
//!
//! The engine never renders anything itself; it drives these traits once per
//! tick. Implementations are expected to be cheap and non-blocking.

use crate::config::{AudioClip, HapticClip};
use crate::hand::HandTarget;

/// One controller's parametric actuator (the Basic backend).
pub trait PulseActuator {
    /// Fire a pulse. `amplitude == 0 && duration_sec == 0` silences the actuator.
    fn send_pulse(&mut self, amplitude: f32, duration_sec: f32);
}

/// Prerecorded-clip haptic playback (the Advanced backend).
///
/// A clip is a voice: playing it again restarts that voice, `stop` silences it.
pub trait ClipActuator {
    fn play_clip(&mut self, clip: &HapticClip, hand: HandTarget, amplitude: f32);
    fn stop_clip(&mut self, clip: &HapticClip);
}

/// A positioned audio source.
///
/// One-shots are fire-and-forget and layer freely. `play` (re)starts the
/// emitter's single non-looping voice at `start_offset_sec` into the clip;
/// the remaining methods address that voice.
pub trait AudioEmitter {
    fn play_one_shot(&mut self, clip: &AudioClip, volume: f32);
    fn play(&mut self, clip: &AudioClip, start_offset_sec: f32);
    fn set_volume(&mut self, volume: f32);
    fn set_pitch(&mut self, pitch: f32);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    /// Clip time left before the voice ends, in seconds.
    fn remaining_time(&self) -> f32;
}

