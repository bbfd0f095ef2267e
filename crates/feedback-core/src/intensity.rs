//! Speed smoothing and normalization into a \[0, 1\] drive signal.

use crate::constants::*;
use crate::error::floor_at;
use crate::math::{clamp01, lerp, remap01};

/// Speed band and smoothing constant for an [`IntensityEstimator`].
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityParams {
    /// Below this smoothed speed (m/s) intensity is 0 and continuous output stops.
    pub min_speed: f32,
    /// Smoothed speed (m/s) that maps to full intensity.
    pub max_speed: f32,
    /// Exponential smoothing time constant, seconds.
    pub smoothing_tau_sec: f32,
}

impl Default for IntensityParams {
    fn default() -> Self {
        Self {
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            smoothing_tau_sec: SPEED_SMOOTHING_TAU_SEC,
        }
    }
}

impl IntensityParams {
    pub fn validated(mut self) -> Self {
        self.min_speed = floor_at("intensity", "min_speed", self.min_speed, 0.0);
        self.max_speed = floor_at(
            "intensity",
            "max_speed",
            self.max_speed,
            self.min_speed + MIN_SPEED_SPAN,
        );
        self.smoothing_tau_sec =
            floor_at("intensity", "smoothing_tau_sec", self.smoothing_tau_sec, MIN_DT_SEC);
        self
    }

    /// Normalize a speed into the \[0, 1\] band.
    pub fn normalize(&self, speed: f32) -> f32 {
        remap01(speed, self.min_speed, self.max_speed)
    }
}

/// Result of one estimator update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensitySample {
    pub smoothed_speed: f32,
    pub intensity: f32,
    /// False when the smoothed speed is under `min_speed`; continuous synthesis should stop.
    pub active: bool,
}

/// Two-stage smoother: the physical speed is smoothed first, then remapped.
///
/// Smoothing the speed (not the normalized value) keeps amplitude from
/// snapping on small fluctuations, and the `1 - exp(-dt/tau)` blend stays
/// stable for arbitrarily large `dt`.
#[derive(Clone, Debug)]
pub struct IntensityEstimator {
    params: IntensityParams,
    smoothed_speed: f32,
    intensity: f32,
}

impl IntensityEstimator {
    pub fn new(params: IntensityParams) -> Self {
        Self {
            params: params.validated(),
            smoothed_speed: 0.0,
            intensity: 0.0,
        }
    }

    pub fn params(&self) -> &IntensityParams {
        &self.params
    }

    pub fn smoothed_speed(&self) -> f32 {
        self.smoothed_speed
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn reset(&mut self) {
        self.smoothed_speed = 0.0;
        self.intensity = 0.0;
    }

    /// Fold one raw speed sample (m/s, ≥ 0) taken `dt_sec` after the previous one.
    pub fn update(&mut self, raw_speed: f32, dt_sec: f32) -> IntensitySample {
        let raw = if raw_speed.is_finite() { raw_speed.max(0.0) } else { 0.0 };
        let dt = dt_sec.max(MIN_DT_SEC);
        let lambda = 1.0 - (-dt / self.params.smoothing_tau_sec).exp();
        self.smoothed_speed = lerp(self.smoothed_speed, raw, clamp01(lambda));

        let active = self.smoothed_speed >= self.params.min_speed;
        self.intensity = if active {
            self.params.normalize(self.smoothed_speed)
        } else {
            0.0
        };
        IntensitySample {
            smoothed_speed: self.smoothed_speed,
            intensity: self.intensity,
            active,
        }
    }
}

/// Instantaneous speed between two positions, with `dt` floored.
pub fn speed_between(prev: glam::Vec3, current: glam::Vec3, dt_sec: f32) -> f32 {
    (current - prev).length() / dt_sec.max(MIN_DT_SEC)
}
