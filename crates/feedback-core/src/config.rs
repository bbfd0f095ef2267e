//! Voice configuration shared by every station.

use crate::error::unit;

/// Reference to an audio asset owned by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    pub name: String,
    pub length_sec: f32,
}

impl AudioClip {
    pub fn new(name: impl Into<String>, length_sec: f32) -> Self {
        Self {
            name: name.into(),
            length_sec: length_sec.max(0.0),
        }
    }
}

/// Reference to a prerecorded haptic clip owned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HapticClip {
    pub name: String,
}

impl HapticClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Immutable description of one feedback voice.
///
/// Fields:
/// - `sfx`: one-shot / loop audio asset
/// - `sfx_volume`: audio gain 0..1
/// - `basic_amplitude`: parametric pulse amplitude 0..1
/// - `advanced_clip`: optional prerecorded haptic clip
/// - `advanced_amplitude`: clip playback amplitude 0..1
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackConfig {
    pub sfx: Option<AudioClip>,
    pub sfx_volume: f32,
    pub basic_amplitude: f32,
    pub advanced_clip: Option<HapticClip>,
    pub advanced_amplitude: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            sfx: None,
            sfx_volume: 1.0,
            basic_amplitude: 1.0,
            advanced_clip: None,
            advanced_amplitude: 1.0,
        }
    }
}

impl FeedbackConfig {
    /// Clamp every scalar into \[0, 1\].
    pub fn validated(mut self) -> Self {
        self.sfx_volume = unit("config", "sfx_volume", self.sfx_volume);
        self.basic_amplitude = unit("config", "basic_amplitude", self.basic_amplitude);
        self.advanced_amplitude = unit("config", "advanced_amplitude", self.advanced_amplitude);
        self
    }

    /// Basic pulse length when no override is given: the audio length, or 0.
    pub fn default_pulse_duration(&self) -> f32 {
        self.sfx.as_ref().map(|c| c.length_sec).unwrap_or(0.0)
    }

    pub fn with_sfx(mut self, clip: AudioClip, volume: f32) -> Self {
        self.sfx = Some(clip);
        self.sfx_volume = volume;
        self
    }

    pub fn with_advanced(mut self, clip: HapticClip, amplitude: f32) -> Self {
        self.advanced_clip = Some(clip);
        self.advanced_amplitude = amplitude;
        self
    }
}
