//! Speed-adaptive debounce for discrete triggers.

use std::hash::Hash;

use fnv::FnvHashMap;

use crate::constants::*;
use crate::error::floor_at;
use crate::math::{inverse_lerp, lerp};

#[derive(Clone, Debug, PartialEq)]
pub struct CooldownParams {
    /// Cooldown after a fast hit, seconds.
    pub min_cooldown_sec: f32,
    /// Cooldown after a slow hit, seconds.
    pub max_cooldown_sec: f32,
    /// At or below this speed the full `max_cooldown_sec` applies.
    pub slow_speed: f32,
    /// At or above this speed only `min_cooldown_sec` applies.
    pub fast_speed: f32,
    /// Known speeds below this are treated as micromovements and ignored.
    pub min_activation_speed: f32,
}

impl Default for CooldownParams {
    fn default() -> Self {
        Self {
            min_cooldown_sec: MIN_COOLDOWN_SEC,
            max_cooldown_sec: MAX_COOLDOWN_SEC,
            slow_speed: SLOW_SPEED,
            fast_speed: FAST_SPEED,
            min_activation_speed: MIN_ACTIVATION_SPEED,
        }
    }
}

impl CooldownParams {
    pub fn validated(mut self) -> Self {
        self.slow_speed = floor_at("cooldown", "slow_speed", self.slow_speed, COOLDOWN_SPEED_FLOOR);
        self.fast_speed = floor_at(
            "cooldown",
            "fast_speed",
            self.fast_speed,
            self.slow_speed + COOLDOWN_SPEED_FLOOR,
        );
        self.min_cooldown_sec = floor_at("cooldown", "min_cooldown_sec", self.min_cooldown_sec, 0.0);
        self.max_cooldown_sec = floor_at(
            "cooldown",
            "max_cooldown_sec",
            self.max_cooldown_sec,
            self.min_cooldown_sec,
        );
        self.min_activation_speed =
            floor_at("cooldown", "min_activation_speed", self.min_activation_speed, 0.0);
        self
    }

    /// Refractory window for a hit at `speed`; the fixed minimum when speed is unknown.
    ///
    /// Monotonically non-increasing in speed.
    pub fn cooldown_for(&self, speed: Option<f32>) -> f32 {
        match speed {
            Some(s) => lerp(
                self.max_cooldown_sec,
                self.min_cooldown_sec,
                inverse_lerp(self.slow_speed, self.fast_speed, s),
            ),
            None => self.min_cooldown_sec,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateDecision {
    Accepted,
    /// Known speed under `min_activation_speed`.
    Micromovement { speed: f32 },
    Debounced { elapsed_sec: f32, cooldown_sec: f32 },
}

impl GateDecision {
    pub fn is_accepted(self) -> bool {
        matches!(self, GateDecision::Accepted)
    }
}

/// Per-source last-trigger timestamps. Owned by one station, never shared.
#[derive(Clone, Debug)]
pub struct CooldownGate<K: Eq + Hash> {
    params: CooldownParams,
    last_trigger: FnvHashMap<K, f64>,
}

impl<K: Eq + Hash + Copy> CooldownGate<K> {
    pub fn new(params: CooldownParams) -> Self {
        Self {
            params: params.validated(),
            last_trigger: FnvHashMap::default(),
        }
    }

    pub fn params(&self) -> &CooldownParams {
        &self.params
    }

    pub fn last_trigger(&self, source: K) -> Option<f64> {
        self.last_trigger.get(&source).copied()
    }

    /// Accept or reject a trigger from `source` at `now_sec`. Acceptance records the time.
    pub fn try_trigger(&mut self, source: K, speed: Option<f32>, now_sec: f64) -> GateDecision {
        if let Some(s) = speed {
            if s < self.params.min_activation_speed {
                return GateDecision::Micromovement { speed: s };
            }
        }
        let cooldown = self.params.cooldown_for(speed);
        if let Some(&last) = self.last_trigger.get(&source) {
            let elapsed = (now_sec - last) as f32;
            if elapsed < cooldown {
                return GateDecision::Debounced {
                    elapsed_sec: elapsed,
                    cooldown_sec: cooldown,
                };
            }
        }
        self.last_trigger.insert(source, now_sec);
        GateDecision::Accepted
    }

    pub fn clear(&mut self) {
        self.last_trigger.clear();
    }
}
