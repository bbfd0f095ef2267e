//! Continuous bed loop built from two alternating non-looping voices.
//!
//! Each voice starts at a random offset so the seam never lands on the same
//! sample twice; when the playing voice is about to run out, the other one
//! fades in over the crossfade window and the roles swap.

use rand::prelude::*;

use crate::backend::AudioEmitter;
use crate::config::AudioClip;
use crate::constants::*;
use crate::error::{floor_at, FeedbackError};
use crate::math::{clamp01, lerp, uniform};

/// Tuning for a [`BedCrossfader`].
#[derive(Clone, Debug, PartialEq)]
pub struct BedParams {
    /// Crossfade window, milliseconds. Also used as the start-up ramp.
    pub crossfade_ms: f32,
    /// Start offsets are drawn from `[0, random_offset_sec)`.
    pub random_offset_sec: f32,
    /// Gain at intensity 0 (rises to the voice's sfx volume at 1).
    pub min_volume: f32,
    /// Playback-rate range across intensity.
    pub pitch: [f32; 2],
}

impl Default for BedParams {
    fn default() -> Self {
        Self {
            crossfade_ms: BED_CROSSFADE_MS,
            random_offset_sec: BED_RANDOM_OFFSET_SEC,
            min_volume: BED_MIN_VOLUME,
            pitch: BED_PITCH,
        }
    }
}

impl BedParams {
    pub fn validated(mut self) -> Self {
        self.crossfade_ms = floor_at(
            "bed",
            "crossfade_ms",
            self.crossfade_ms,
            BED_CROSSFADE_FLOOR_SEC * 1000.0,
        );
        self.random_offset_sec = floor_at("bed", "random_offset_sec", self.random_offset_sec, 0.0);
        self.min_volume = clamp01(self.min_volume);
        self.pitch = [self.pitch[0].max(0.01), self.pitch[1].max(0.01)];
        self
    }

    pub fn crossfade_sec(&self) -> f32 {
        (self.crossfade_ms / 1000.0).max(BED_CROSSFADE_FLOOR_SEC)
    }

    /// Target gain for `intensity`, topping out at `full_volume`.
    pub fn volume(&self, intensity: f32, full_volume: f32) -> f32 {
        clamp01(lerp(self.min_volume, full_volume, clamp01(intensity)))
    }

    pub fn pitch(&self, intensity: f32) -> f32 {
        lerp(self.pitch[0], self.pitch[1], clamp01(intensity))
    }
}

/// Where the crossfader is in its cycle.
///
/// Stopping is not a resting state: [`BedCrossfader::stop`] silences both
/// voices synchronously and lands in `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BedState {
    Stopped,
    /// Primary voice ramping up from silence.
    Starting { elapsed_sec: f32 },
    Steady,
    /// Secondary voice fading in over the primary.
    Crossfading { elapsed_sec: f32 },
}

/// Two-voice crossfading loop driven once per tick.
pub struct BedCrossfader {
    params: BedParams,
    voices: [Box<dyn AudioEmitter>; 2],
    primary: usize,
    state: BedState,
    clip: Option<AudioClip>,
    full_volume: f32,
    rng: StdRng,
}

impl BedCrossfader {
    pub fn new(
        params: BedParams,
        voice_a: Box<dyn AudioEmitter>,
        voice_b: Box<dyn AudioEmitter>,
        seed: u64,
    ) -> Self {
        Self {
            params: params.validated(),
            voices: [voice_a, voice_b],
            primary: 0,
            state: BedState::Stopped,
            clip: None,
            full_volume: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> &BedParams {
        &self.params
    }

    pub fn state(&self) -> BedState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != BedState::Stopped
    }

    /// Voices the crossfader currently owns as playing: 0, 1, or 2 while crossfading.
    pub fn active_voices(&self) -> usize {
        match self.state {
            BedState::Stopped => 0,
            BedState::Starting { .. } | BedState::Steady => 1,
            BedState::Crossfading { .. } => 2,
        }
    }

    /// Start the loop if it is not already running.
    pub fn start(
        &mut self,
        clip: Option<&AudioClip>,
        full_volume: f32,
        intensity: f32,
    ) -> Result<(), FeedbackError> {
        if self.is_running() {
            return Ok(());
        }
        let clip = clip.ok_or(FeedbackError::MissingConfiguration("bed audio clip"))?;
        // Re-entry after stop reuses the same two voices; make sure neither is left sounding.
        for v in self.voices.iter_mut() {
            v.stop();
        }
        self.clip = Some(clip.clone());
        self.full_volume = clamp01(full_volume);
        self.primary = 0;
        let offset = self.random_offset();
        let pitch = self.params.pitch(intensity);
        let voice = &mut self.voices[self.primary];
        voice.set_volume(0.0);
        voice.set_pitch(pitch);
        voice.play(clip, offset);
        self.state = BedState::Starting { elapsed_sec: 0.0 };
        log::debug!("[bed] start '{}' at {offset:.3}s", clip.name);
        Ok(())
    }

    /// Silence both voices now.
    pub fn stop(&mut self) {
        if self.state != BedState::Stopped {
            log::debug!("[bed] stop from {:?}", self.state);
        }
        for v in self.voices.iter_mut() {
            v.stop();
        }
        self.state = BedState::Stopped;
        self.primary = 0;
    }

    /// Advance one tick: retune gain and pitch from `intensity`, step ramps and crossfades.
    pub fn tick(&mut self, dt_sec: f32, intensity: f32) {
        let dt = dt_sec.max(0.0);
        let xfade = self.params.crossfade_sec();
        let target = self.params.volume(intensity, self.full_volume);
        let pitch = self.params.pitch(intensity);
        let p = self.primary;
        let s = 1 - p;

        match self.state {
            BedState::Stopped => {}
            BedState::Starting { elapsed_sec } => {
                let elapsed = elapsed_sec + dt;
                let k = clamp01(elapsed / xfade);
                self.voices[p].set_volume(target * k);
                self.voices[p].set_pitch(pitch);
                self.state = if k >= 1.0 {
                    BedState::Steady
                } else {
                    BedState::Starting { elapsed_sec: elapsed }
                };
                self.maybe_begin_crossfade(xfade, pitch);
            }
            BedState::Steady => {
                self.voices[p].set_volume(target);
                self.voices[p].set_pitch(pitch);
                self.maybe_begin_crossfade(xfade, pitch);
            }
            BedState::Crossfading { elapsed_sec } => {
                if !self.voices[s].is_playing() {
                    // Incoming voice ran out mid-fade: hand over now and relaunch.
                    self.voices[p].stop();
                    self.primary = s;
                    self.state = BedState::Steady;
                    self.maybe_begin_crossfade(xfade, pitch);
                    return;
                }
                let elapsed = elapsed_sec + dt;
                let k = clamp01(elapsed / xfade);
                self.voices[s].set_volume(target * k);
                self.voices[s].set_pitch(pitch);
                self.voices[p].set_volume(target * (1.0 - k));
                self.voices[p].set_pitch(pitch);
                if k >= 1.0 {
                    self.voices[p].stop();
                    self.primary = s;
                    self.state = BedState::Steady;
                    // On short clips the new primary may already be inside its tail.
                    self.maybe_begin_crossfade(xfade, pitch);
                } else {
                    self.state = BedState::Crossfading { elapsed_sec: elapsed };
                }
            }
        }
    }

    fn maybe_begin_crossfade(&mut self, xfade: f32, pitch: f32) {
        let p = self.primary;
        let voice = &self.voices[p];
        // Remaining time is clip time; the fade consumes `xfade * pitch` of it.
        if voice.is_playing() && voice.remaining_time() > xfade * pitch {
            return;
        }
        let Some(clip) = self.clip.clone() else {
            return;
        };
        let offset = self.random_offset();
        let next = &mut self.voices[1 - p];
        next.set_volume(0.0);
        next.set_pitch(pitch);
        next.play(&clip, offset);
        self.state = BedState::Crossfading { elapsed_sec: 0.0 };
    }

    fn random_offset(&mut self) -> f32 {
        let len = self
            .clip
            .as_ref()
            .map(|c| c.length_sec)
            .unwrap_or(0.0)
            .max(BED_MIN_CLIP_SEC);
        // Leave room for a full crossfade after the start point.
        let hi = (len - self.params.crossfade_sec() - BED_OFFSET_TAIL_GUARD_SEC).max(0.0);
        uniform(&mut self.rng, 0.0, self.params.random_offset_sec).clamp(0.0, hi)
    }
}
