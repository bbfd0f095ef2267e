use glam::Vec3;

use crate::constants::{DEFAULT_FIXED_DT_SEC, FIXED_DT_FLOOR_SEC};

/// How the striking body moves when the impact is reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyMotion {
    /// Physics-driven: the engine knows the velocity.
    Dynamic { velocity: Vec3 },
    /// Moved by the hand each step: speed is estimated from displacement.
    Kinematic { position: Vec3 },
}

/// Estimates impact speed for a body that may or may not be simulated.
///
/// Call [`ImpactRelay::fixed_update`] once per physics step with the body's
/// position; an impact reported mid-step then measures displacement since
/// that step.
#[derive(Clone, Debug)]
pub struct ImpactRelay {
    last_pos: Vec3,
    fixed_dt: f32,
}

impl Default for ImpactRelay {
    fn default() -> Self {
        Self::new(Vec3::ZERO, DEFAULT_FIXED_DT_SEC)
    }
}

impl ImpactRelay {
    pub fn new(start: Vec3, fixed_dt: f32) -> Self {
        Self {
            last_pos: start,
            fixed_dt: fixed_dt.max(FIXED_DT_FLOOR_SEC),
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    pub fn fixed_update(&mut self, position: Vec3) {
        self.last_pos = position;
    }

    pub fn impact_speed(&self, motion: BodyMotion) -> f32 {
        let speed = match motion {
            BodyMotion::Dynamic { velocity } => velocity.length(),
            BodyMotion::Kinematic { position } => (position - self.last_pos).length() / self.fixed_dt,
        };
        log::debug!("[relay] {motion:?} -> {speed:.3} m/s");
        speed
    }
}
