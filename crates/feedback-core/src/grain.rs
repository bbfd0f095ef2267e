//! Distance-driven grain scheduling.
//!
//! Grains follow a spatial Poisson process: the gap (in meters swept) to the
//! next grain is exponentially distributed with mean
//! `1 / lerp(min_rate, max_rate, intensity)`. A stationary contact emits
//! nothing, a fast sweep emits many grains per second.

use rand::prelude::*;
use smallvec::SmallVec;

use crate::constants::*;
use crate::error::{floor_at, ordered_range};
use crate::math::{clamp01, lerp, uniform};

/// Tuning for a [`GrainScheduler`].
#[derive(Clone, Debug, PartialEq)]
pub struct GrainParams {
    /// Grains per meter at intensity 0.
    pub grains_per_meter_at_min: f32,
    /// Grains per meter at intensity 1.
    pub grains_per_meter_at_max: f32,
    /// Random grain length range, milliseconds.
    pub length_ms: [f32; 2],
    /// Random playback-rate range.
    pub pitch: [f32; 2],
    /// Grain volume at intensity 0 (rises to the voice's sfx volume at 1).
    pub volume_min: f32,
    /// Minimum spacing between grain haptic pulses, seconds.
    pub haptic_refractory_sec: f64,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            grains_per_meter_at_min: GRAINS_PER_METER_AT_MIN,
            grains_per_meter_at_max: GRAINS_PER_METER_AT_MAX,
            length_ms: GRAIN_LEN_MS,
            pitch: GRAIN_PITCH,
            volume_min: GRAIN_VOLUME_MIN,
            haptic_refractory_sec: GRAIN_HAPTIC_REFRACTORY_SEC,
        }
    }
}

impl GrainParams {
    pub fn validated(mut self) -> Self {
        self.grains_per_meter_at_min =
            floor_at("grain", "grains_per_meter_at_min", self.grains_per_meter_at_min, 0.0);
        self.grains_per_meter_at_max =
            floor_at("grain", "grains_per_meter_at_max", self.grains_per_meter_at_max, 0.0);
        self.length_ms = ordered_range("grain", "length_ms", self.length_ms, GRAIN_LEN_MS_FLOOR);
        self.pitch = ordered_range("grain", "pitch", self.pitch, GRAIN_PITCH_FLOOR);
        self.volume_min = clamp01(self.volume_min);
        self.haptic_refractory_sec = self.haptic_refractory_sec.max(0.0);
        self
    }

    /// Expected meters between grains at `intensity`.
    pub fn mean_distance(&self, intensity: f32) -> f32 {
        let rate = lerp(
            self.grains_per_meter_at_min,
            self.grains_per_meter_at_max,
            clamp01(intensity),
        );
        1.0 / rate.max(GRAINS_PER_METER_FLOOR)
    }
}

/// Audio half of a grain: play `length_sec` of the clip from `start_sec`.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainAudio {
    pub start_sec: f32,
    pub length_sec: f32,
    pub volume: f32,
    pub pitch: f32,
}

impl GrainAudio {
    /// Wall-clock time the grain plays before being cut.
    pub fn play_duration_sec(&self) -> f32 {
        (self.length_sec / self.pitch.max(GRAIN_MIN_PITCH_DIVISOR)).max(GRAIN_MIN_PLAY_SEC)
    }
}

/// Haptic half of a grain: a short parametric click.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainPulse {
    /// Multiplier applied to the voice's basic amplitude.
    pub amplitude: f32,
    pub duration_sec: f32,
}

/// A fired grain. Consumed immediately by the caller; never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct GrainEvent {
    pub intensity: f32,
    pub timestamp_sec: f64,
    /// `None` when the voice has no clip to slice.
    pub audio: Option<GrainAudio>,
    /// `None` when the haptic refractory window swallowed this grain.
    pub haptic: Option<GrainPulse>,
}

pub type GrainBuffer = SmallVec<[GrainEvent; MAX_GRAINS_PER_TICK]>;

/// Distance accumulator plus next-threshold draw.
pub struct GrainScheduler {
    params: GrainParams,
    rng: StdRng,
    distance_acc: f32,
    next_grain_dist: f32,
    haptic_ready_at: f64,
}

impl GrainScheduler {
    pub fn new(params: GrainParams, seed: u64) -> Self {
        let mut s = Self {
            params: params.validated(),
            rng: StdRng::seed_from_u64(seed),
            distance_acc: 0.0,
            next_grain_dist: 0.0,
            haptic_ready_at: f64::NEG_INFINITY,
        };
        s.reset(0.0);
        s
    }

    pub fn params(&self) -> &GrainParams {
        &self.params
    }

    pub fn distance_accumulated(&self) -> f32 {
        self.distance_acc
    }

    pub fn next_grain_distance(&self) -> f32 {
        self.next_grain_dist
    }

    /// Clear the accumulator and draw a fresh threshold for `intensity`.
    pub fn reset(&mut self, intensity: f32) {
        self.distance_acc = 0.0;
        self.next_grain_dist = self.draw_distance(intensity);
    }

    /// One exponential draw: `-ln(U) * mean_distance(intensity)`.
    pub fn draw_distance(&mut self, intensity: f32) -> f32 {
        let u = clamp01(self.rng.gen::<f32>()).max(GRAIN_UNIFORM_FLOOR);
        -u.ln() * self.params.mean_distance(intensity)
    }

    /// Advance by `smoothed_speed * dt` meters, pushing every grain crossed.
    ///
    /// At most [`MAX_GRAINS_PER_TICK`] grains fire per call; a teleport-sized
    /// step drops the distance beyond that.
    ///
    /// `clip` carries `(clip_length_sec, full_volume)` when an audio slice
    /// source exists.
    pub fn advance(
        &mut self,
        smoothed_speed: f32,
        dt_sec: f32,
        intensity: f32,
        now_sec: f64,
        clip: Option<(f32, f32)>,
        out: &mut GrainBuffer,
    ) {
        let step = smoothed_speed.max(0.0) * dt_sec.max(0.0);
        if !step.is_finite() {
            return;
        }
        self.distance_acc += step;
        let mut fired = 0;
        while self.distance_acc >= self.next_grain_dist {
            if fired == MAX_GRAINS_PER_TICK {
                log::debug!("[grain] per-tick cap hit, dropping {:.3} m", self.distance_acc);
                self.distance_acc = 0.0;
                break;
            }
            fired += 1;
            self.distance_acc -= self.next_grain_dist;
            let ev = self.fire(intensity, now_sec, clip);
            out.push(ev);
            self.next_grain_dist = self.draw_distance(intensity);
        }
    }

    fn fire(&mut self, intensity: f32, now_sec: f64, clip: Option<(f32, f32)>) -> GrainEvent {
        let t = clamp01(intensity);
        let audio = clip.map(|(clip_len, full_volume)| {
            let p = &self.params;
            let length_sec = uniform(&mut self.rng, p.length_ms[0], p.length_ms[1]) / 1000.0;
            let max_start = (clip_len - length_sec - GRAIN_TAIL_GUARD_SEC).max(0.0);
            let start_sec = uniform(&mut self.rng, 0.0, max_start);
            let jitter = uniform(
                &mut self.rng,
                GRAIN_VOLUME_JITTER[0],
                GRAIN_VOLUME_JITTER[1],
            );
            let volume = clamp01(lerp(p.volume_min, full_volume, t) * jitter);
            let pitch = uniform(&mut self.rng, p.pitch[0], p.pitch[1]);
            GrainAudio {
                start_sec,
                length_sec,
                volume,
                pitch,
            }
        });

        // Only the haptic half is throttled; actuators saturate long before mixers do.
        let haptic = if now_sec >= self.haptic_ready_at {
            self.haptic_ready_at = now_sec + self.params.haptic_refractory_sec;
            let jitter = uniform(
                &mut self.rng,
                GRAIN_HAPTIC_AMP_JITTER[0],
                GRAIN_HAPTIC_AMP_JITTER[1],
            );
            Some(GrainPulse {
                amplitude: lerp(GRAIN_HAPTIC_AMP[0], GRAIN_HAPTIC_AMP[1], t) * jitter,
                duration_sec: uniform(
                    &mut self.rng,
                    GRAIN_HAPTIC_DUR_SEC[0],
                    GRAIN_HAPTIC_DUR_SEC[1],
                ),
            })
        } else {
            None
        };

        GrainEvent {
            intensity: t,
            timestamp_sec: now_sec,
            audio,
            haptic,
        }
    }
}
