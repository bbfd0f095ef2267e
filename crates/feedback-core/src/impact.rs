//! One-shot collision speed to output amplitude.

use crate::constants::*;
use crate::error::floor_at;
use crate::math::clamp01;

/// Bit set of allowed surface categories (one bit per category, like a layer mask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceMask(pub u32);

impl SurfaceMask {
    pub const ALL: SurfaceMask = SurfaceMask(u32::MAX);
    pub const NONE: SurfaceMask = SurfaceMask(0);

    pub fn from_categories(categories: &[u8]) -> Self {
        SurfaceMask(
            categories
                .iter()
                .filter(|&&c| c < 32)
                .fold(0, |m, &c| m | (1 << c)),
        )
    }

    /// True when `category` (0..32) is in the mask. Out-of-range categories never match.
    pub fn contains(self, category: u8) -> bool {
        category < 32 && self.0 & (1 << category) != 0
    }
}

impl Default for SurfaceMask {
    fn default() -> Self {
        SurfaceMask::ALL
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImpactParams {
    /// Speed (m/s) at or below which amplitude is 0.
    pub min_impact_speed: f32,
    /// Speed (m/s) giving full amplitude.
    pub max_impact_speed: f32,
    /// Amplitudes at or below this are suppressed entirely.
    pub epsilon: f32,
    pub surfaces: SurfaceMask,
}

impl Default for ImpactParams {
    fn default() -> Self {
        Self {
            min_impact_speed: MIN_IMPACT_SPEED,
            max_impact_speed: MAX_IMPACT_SPEED,
            epsilon: IMPACT_EPSILON,
            surfaces: SurfaceMask::ALL,
        }
    }
}

impl ImpactParams {
    pub fn validated(mut self) -> Self {
        self.min_impact_speed = floor_at("impact", "min_impact_speed", self.min_impact_speed, 0.0);
        self.max_impact_speed = floor_at(
            "impact",
            "max_impact_speed",
            self.max_impact_speed,
            self.min_impact_speed + MIN_SPEED_SPAN,
        );
        self.epsilon = clamp01(self.epsilon);
        self
    }
}

/// What happened to an impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImpactOutcome {
    /// Produce feedback at this amplitude (0..1].
    Accepted(f32),
    /// Too soft: nothing is played.
    BelowThreshold(f32),
    /// The contacted surface is not in the allowed set.
    FilteredSurface,
}

impl ImpactOutcome {
    pub fn amplitude(self) -> Option<f32> {
        match self {
            ImpactOutcome::Accepted(a) => Some(a),
            _ => None,
        }
    }
}

/// Linear speed remap with threshold gating and a surface filter.
#[derive(Clone, Debug)]
pub struct ImpactMapper {
    params: ImpactParams,
}

impl ImpactMapper {
    pub fn new(params: ImpactParams) -> Self {
        Self {
            params: params.validated(),
        }
    }

    pub fn params(&self) -> &ImpactParams {
        &self.params
    }

    /// `clamp01((speed - min) / (max - min))`, ungated.
    pub fn amplitude(&self, speed: f32) -> f32 {
        let p = &self.params;
        clamp01((speed - p.min_impact_speed) / (p.max_impact_speed - p.min_impact_speed))
    }

    pub fn map(&self, speed: f32, category: u8) -> ImpactOutcome {
        if !self.params.surfaces.contains(category) {
            return ImpactOutcome::FilteredSurface;
        }
        let amp = self.amplitude(speed);
        if amp <= self.params.epsilon {
            ImpactOutcome::BelowThreshold(amp)
        } else {
            ImpactOutcome::Accepted(amp)
        }
    }
}
