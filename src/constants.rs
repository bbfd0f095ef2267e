// Station tuning defaults.
//
// Engine-level tuning (speed bands, grains, bed, cooldowns) lives in
// `feedback_core::constants`; these are the per-station values.

// Drill
pub const DRILL_HAPTIC_INTERVAL_SEC: f32 = 0.3; // basic-mode re-pulse period while the trigger is held

// Drum pads
pub const DRUM_PULSE_DURATION_SEC: f32 = 0.04;

// Projectile launcher
pub const PROJECTILE_SPEED: f32 = 20.0; // m/s along the muzzle's forward axis
pub const PROJECTILE_LIFETIME_SEC: f32 = 3.0;

// Impact relay (kinematic bodies)
pub const DEFAULT_FIXED_DT_SEC: f32 = 0.02; // 50 Hz physics step
pub const FIXED_DT_FLOOR_SEC: f32 = 0.0001;
