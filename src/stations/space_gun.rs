use glam::Vec3;

use feedback_core::{AudioEmitter, Cue, FeedbackConfig, FeedbackContext, HandTarget};

use super::play_sfx;
use crate::constants::{PROJECTILE_LIFETIME_SEC, PROJECTILE_SPEED};

/// Host-side projectile factory. The host owns spawning, motion and despawn.
pub trait ProjectileSpawner {
    fn spawn(&mut self, position: Vec3, velocity: Vec3, lifetime_sec: f32);
}

/// Where projectiles leave the barrel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Muzzle {
    pub position: Vec3,
    pub forward: Vec3,
}

pub struct SpaceGunStation {
    config: FeedbackConfig,
    emitter: Box<dyn AudioEmitter>,
    launcher: Option<Box<dyn ProjectileSpawner>>,
    hand: HandTarget,
    pub projectile_speed: f32,
    pub projectile_lifetime_sec: f32,
}

impl SpaceGunStation {
    pub fn new(config: FeedbackConfig, emitter: Box<dyn AudioEmitter>) -> Self {
        Self {
            config: config.validated(),
            emitter,
            launcher: None,
            hand: HandTarget::Right,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_sec: PROJECTILE_LIFETIME_SEC,
        }
    }

    pub fn with_launcher(mut self, launcher: Box<dyn ProjectileSpawner>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn hand(&self) -> HandTarget {
        self.hand
    }

    pub fn grab(&mut self, hand: HandTarget) {
        self.hand = hand;
    }

    /// Trigger pulled. Returns true if a projectile was spawned.
    pub fn fire(&mut self, ctx: &mut FeedbackContext, muzzle: Option<Muzzle>) -> bool {
        if let Err(e) = play_sfx("gun", &mut *self.emitter, &self.config, 1.0) {
            log::warn!("[gun] {e}");
        }
        ctx.play_logged("gun", &Cue::new(&self.config, self.hand));

        match (self.launcher.as_mut(), muzzle) {
            (Some(launcher), Some(m)) => {
                let velocity = m.forward.normalize_or_zero() * self.projectile_speed;
                launcher.spawn(m.position, velocity, self.projectile_lifetime_sec);
                true
            }
            _ => false,
        }
    }
}
