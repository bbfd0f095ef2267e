//! One continuous hold-and-touch episode.
//!
//! A [`ContactSession`] is owned by a station and lives for the station's
//! lifetime; `begin` and `end` mark the episode boundaries and reset the
//! per-episode state. Exactly one episode is live at a time.
//!
//! Per tick: position delta → [`IntensityEstimator`] → bed loop, bed pulses
//! and grain stream. Losing the hold or the last contact stops everything
//! synchronously in the same call.

use glam::Vec3;

use crate::backend::AudioEmitter;
use crate::bed::{BedCrossfader, BedParams, BedState};
use crate::config::FeedbackConfig;
use crate::constants::*;
use crate::dispatch::Cue;
use crate::grain::{GrainBuffer, GrainParams, GrainScheduler};
use crate::hand::HandTarget;
use crate::intensity::{speed_between, IntensityEstimator, IntensityParams};
use crate::math::{lerp, mix_seed};
use crate::mode::FeedbackContext;

/// Tuning bundle for a [`ContactSession`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionParams {
    pub intensity: IntensityParams,
    pub grain: GrainParams,
    pub bed: BedParams,
}

/// The audio voices a session renders through: two bed voices and one grain voice.
pub struct SessionVoices {
    pub bed_a: Box<dyn AudioEmitter>,
    pub bed_b: Box<dyn AudioEmitter>,
    pub grain: Box<dyn AudioEmitter>,
}

/// What one tick produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionTick {
    pub intensity: f32,
    pub grains: usize,
    pub haptic_grains: usize,
    pub bed_pulse: bool,
}

pub struct ContactSession {
    config: FeedbackConfig,
    estimator: IntensityEstimator,
    grains: GrainScheduler,
    bed: BedCrossfader,
    grain_voice: Box<dyn AudioEmitter>,
    grain_buf: GrainBuffer,
    hand: HandTarget,
    held: bool,
    in_contact: bool,
    last_pos: Vec3,
    bed_pulse_timer: f32,
    grain_stop_in: Option<f32>,
    warned_missing_clip: bool,
}

impl ContactSession {
    pub fn new(params: SessionParams, config: FeedbackConfig, voices: SessionVoices, seed: u64) -> Self {
        let SessionVoices { bed_a, bed_b, grain } = voices;
        Self {
            config: config.validated(),
            estimator: IntensityEstimator::new(params.intensity),
            grains: GrainScheduler::new(params.grain, mix_seed(seed, 0)),
            bed: BedCrossfader::new(params.bed, bed_a, bed_b, mix_seed(seed, 1)),
            grain_voice: grain,
            grain_buf: GrainBuffer::new(),
            hand: HandTarget::default(),
            held: false,
            in_contact: false,
            last_pos: Vec3::ZERO,
            bed_pulse_timer: 0.0,
            grain_stop_in: None,
            warned_missing_clip: false,
        }
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    pub fn hand(&self) -> HandTarget {
        self.hand
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn in_contact(&self) -> bool {
        self.in_contact
    }

    pub fn intensity(&self) -> f32 {
        self.estimator.intensity()
    }

    pub fn smoothed_speed(&self) -> f32 {
        self.estimator.smoothed_speed()
    }

    pub fn bed_state(&self) -> BedState {
        self.bed.state()
    }

    pub fn active_bed_voices(&self) -> usize {
        self.bed.active_voices()
    }

    pub fn grain_scheduler(&self) -> &GrainScheduler {
        &self.grains
    }

    /// Grab: start a new episode held by `hand`, sampling from `position`.
    pub fn begin(&mut self, hand: HandTarget, position: Vec3) {
        log::info!("[session] begin hand={hand:?}");
        self.held = true;
        self.hand = hand;
        self.last_pos = position;
        self.estimator.reset();
        self.grains.reset(0.0);
        self.bed_pulse_timer = 0.0;
        self.warned_missing_clip = false;
    }

    /// Release: drop contact and silence every output.
    pub fn end(&mut self, ctx: &mut FeedbackContext) {
        if self.held {
            log::info!("[session] end hand={:?}", self.hand);
        }
        self.held = false;
        self.in_contact = false;
        self.stop_all(ctx);
    }

    /// Contact gained or lost. Losing contact stops all output.
    pub fn set_contact(&mut self, ctx: &mut FeedbackContext, in_contact: bool) {
        if in_contact == self.in_contact {
            return;
        }
        if in_contact {
            if !self.held {
                return;
            }
            self.in_contact = true;
            self.grains.reset(self.estimator.intensity());
        } else {
            self.in_contact = false;
            self.stop_all(ctx);
        }
    }

    /// Advance one frame with the held object now at `position`.
    pub fn tick(&mut self, ctx: &mut FeedbackContext, dt_sec: f32, position: Vec3) -> SessionTick {
        let mut out = SessionTick::default();
        if !self.held || !self.in_contact {
            self.last_pos = position;
            return out;
        }

        let dt = dt_sec.max(MIN_DT_SEC);
        let raw = speed_between(self.last_pos, position, dt);
        self.last_pos = position;

        if let Some(left) = self.grain_stop_in.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.grain_voice.stop();
                self.grain_stop_in = None;
            }
        }

        let sample = self.estimator.update(raw, dt);
        if !sample.active {
            self.bed.stop();
            self.grains.reset(0.0);
            return out;
        }
        let t = sample.intensity;
        out.intensity = t;

        if !self.bed.is_running() {
            if let Err(e) = self.bed.start(self.config.sfx.as_ref(), self.config.sfx_volume, t) {
                if !self.warned_missing_clip {
                    log::warn!("[session] {e}");
                    self.warned_missing_clip = true;
                }
            }
        }
        self.bed.tick(dt, t);

        self.bed_pulse_timer -= dt;
        if self.bed_pulse_timer <= 0.0 {
            let cue = Cue::new(&self.config, self.hand)
                .amplitude(lerp(BED_PULSE_AMP[0], BED_PULSE_AMP[1], t))
                .duration(lerp(BED_PULSE_DUR_SEC[0], BED_PULSE_DUR_SEC[1], t))
                .pulse_only();
            ctx.play_logged("session", &cue);
            self.bed_pulse_timer = lerp(BED_PULSE_PERIOD_SEC[0], BED_PULSE_PERIOD_SEC[1], t);
            out.bed_pulse = true;
        }

        let clip = self
            .config
            .sfx
            .as_ref()
            .map(|c| (c.length_sec, self.config.sfx_volume));
        self.grain_buf.clear();
        self.grains
            .advance(sample.smoothed_speed, dt, t, ctx.now(), clip, &mut self.grain_buf);

        for ev in self.grain_buf.drain(..) {
            out.grains += 1;
            if let (Some(audio), Some(sfx)) = (ev.audio.as_ref(), self.config.sfx.as_ref()) {
                self.grain_voice.set_volume(audio.volume);
                self.grain_voice.set_pitch(audio.pitch);
                self.grain_voice.play(sfx, audio.start_sec);
                self.grain_stop_in = Some(audio.play_duration_sec());
            }
            if let Some(pulse) = ev.haptic {
                let cue = Cue::new(&self.config, self.hand)
                    .amplitude(pulse.amplitude)
                    .duration(pulse.duration_sec)
                    .pulse_only();
                ctx.play_logged("session", &cue);
                out.haptic_grains += 1;
            }
        }
        out
    }

    /// Stop the bed, the grain voice and both haptic backends; rearm the grain draw.
    pub fn stop_all(&mut self, ctx: &mut FeedbackContext) {
        self.bed.stop();
        if self.grain_voice.is_playing() {
            self.grain_voice.stop();
        }
        self.grain_stop_in = None;
        ctx.dispatcher.stop_all(self.hand, &self.config);
        self.estimator.reset();
        self.grains.reset(0.0);
        self.bed_pulse_timer = 0.0;
    }
}
